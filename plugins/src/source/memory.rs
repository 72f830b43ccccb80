use prospector_core::error::LeadError;
use prospector_core::record::{Record, RecordDraft};
use prospector_core::source::RecordSource;

/// Records handed over directly, e.g. from another session.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    drafts: Vec<RecordDraft>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, drafts: Vec<RecordDraft>) -> Self {
        Self {
            name: name.into(),
            drafts,
        }
    }

    pub fn from_records(name: impl Into<String>, records: &[Record]) -> Self {
        Self::new(
            name,
            records.iter().cloned().map(RecordDraft::from).collect(),
        )
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn load(&self) -> Result<Vec<RecordDraft>, LeadError> {
        Ok(self.drafts.clone())
    }
}
