//! Seams to the outside world: where records come from and where the working
//! set is persisted. Concrete implementations live in `prospector-plugins`.

use crate::error::LeadError;
use crate::record::{Record, RecordDraft};

pub trait RecordSource {
    /// Human-readable origin used in log lines and error messages.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Vec<RecordDraft>, LeadError>;
}

pub trait RecordSink {
    fn describe(&self) -> String;

    fn save(&self, records: &[Record]) -> Result<(), LeadError>;
}
