pub mod date;
pub mod id;
pub mod types;

pub use date::{format_date, parse_date};
pub use id::derive_record_id;
pub use types::{Record, RecordDraft, CONFIDENCE_MAX, CONFIDENCE_MIN, RESERVED_KEYS};
