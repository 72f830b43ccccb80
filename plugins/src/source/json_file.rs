use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use prospector_core::error::LeadError;
use prospector_core::record::RecordDraft;
use prospector_core::source::RecordSource;

/// Reads a JSON array of lead objects from disk.
///
/// An empty (or whitespace-only) file is an empty record set. A missing file
/// is a load error unless the source was built with [`allow_missing`].
///
/// [`allow_missing`]: JsonFileSource::allow_missing
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    allow_missing: bool,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            allow_missing: false,
        }
    }

    /// Treat a file that does not exist yet as empty. Used for the working set.
    pub fn allow_missing(mut self) -> Self {
        self.allow_missing = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<RecordDraft>> {
        if self.allow_missing && !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "source file absent, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).context("Expected a JSON array of lead objects")
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<RecordDraft>, LeadError> {
        self.read()
            .map_err(|e| LeadError::load(self.describe(), format!("{e:#}")))
    }
}
