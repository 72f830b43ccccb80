use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use prospector_core::error::LeadError;
use prospector_core::export::{JsonExporter, RecordExporter};
use prospector_core::record::Record;
use prospector_core::source::RecordSink;

/// Persists the working set as the JSON export form, so the file can be read
/// back by [`JsonFileSource`](crate::source::JsonFileSource).
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Write next to the target and rename, so a failed write keeps the old file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))
    }
}

impl RecordSink for JsonFileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn save(&self, records: &[Record]) -> Result<(), LeadError> {
        let refs: Vec<&Record> = records.iter().collect();
        let bytes = JsonExporter
            .export(&refs)
            .map_err(|e| LeadError::save(self.describe(), e))?;
        self.write(&bytes)
            .map_err(|e| LeadError::save(self.describe(), format!("{e:#}")))
    }
}
