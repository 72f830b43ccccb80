use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use prospector_core::error::LeadError;
use prospector_core::export::ExportFormat;

/// Places export bytes at `<directory>/<basename>.<ext>` unless told otherwise.
#[derive(Debug, Clone)]
pub struct ExportFileWriter {
    directory: PathBuf,
    basename: String,
}

impl ExportFileWriter {
    pub fn new(directory: impl Into<PathBuf>, basename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            basename: basename.into(),
        }
    }

    pub fn path_for(&self, format: ExportFormat) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.basename, format.extension()))
    }

    /// Writes `bytes` to `out`, or to [`path_for`](Self::path_for) when `out`
    /// is `None`. Returns the path written.
    pub fn write(
        &self,
        format: ExportFormat,
        bytes: &[u8],
        out: Option<&Path>,
    ) -> Result<PathBuf, LeadError> {
        let path = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.path_for(format));
        write_file(&path, bytes)
            .map_err(|e| LeadError::Export(format!("{e:#}")))?;
        tracing::info!(path = %path.display(), %format, bytes = bytes.len(), "export written");
        Ok(path)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        let w = ExportFileWriter::new("/srv/out", "final-collection");
        assert_eq!(
            w.path_for(ExportFormat::Xlsx),
            Path::new("/srv/out/final-collection.xlsx")
        );
    }

    #[test]
    fn test_write_to_default_and_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let w = ExportFileWriter::new(dir.path().join("exports"), "final-collection");

        let written = w.write(ExportFormat::Csv, b"a,b\n", None).unwrap();
        assert_eq!(written, dir.path().join("exports/final-collection.csv"));
        assert_eq!(std::fs::read(&written).unwrap(), b"a,b\n");

        let explicit = dir.path().join("mine.json");
        let written = w.write(ExportFormat::Json, b"[]", Some(&explicit)).unwrap();
        assert_eq!(written, explicit);
    }
}
