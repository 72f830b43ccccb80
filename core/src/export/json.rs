use crate::error::LeadError;
use crate::record::Record;

use super::{ExportFormat, RecordExporter};

/// Pretty-printed array of record objects, readable by the JSON file source.
pub struct JsonExporter;

impl RecordExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, records: &[&Record]) -> Result<Vec<u8>, LeadError> {
        serde_json::to_vec_pretty(records)
            .map_err(|e| LeadError::Export(format!("serde_json serialize records: {e}")))
    }
}
