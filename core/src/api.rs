//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `prospector_core::api` instead of reaching into internal modules.

pub use crate::annotate::{
    parse_field_assignment, validate_field_key, Analysis, MiningNotes, Sentiment, ANALYSIS_KEY,
    MINED_KEY, MINING_KEY,
};
pub use crate::config::{
    load_default, load_from_path, AppConfig, DataConfig, ExportConfig, LoggingConfig, ViewConfig,
    WorkflowConfig,
};
pub use crate::error::{CliError, ErrorKind, LeadError};
pub use crate::export::{build_exporter, ExportFormat, ExportOptions, RecordExporter};
pub use crate::record::{format_date, parse_date, Record, RecordDraft};
pub use crate::session::Session;
pub use crate::source::{RecordSink, RecordSource};
pub use crate::stats::{format_text as format_stats, Stats};
pub use crate::store::{MergeReport, RecordStore};
pub use crate::view::{
    CompanyMatch, DatePreset, DateRange, FilterCriteria, SortDirection, SortKey, SortSpec,
    ViewController,
};
pub use crate::workflow::{
    AdvanceOutcome, Stage, StageTransition, TransitionError, WorkflowManager, WorkflowVariant,
};
