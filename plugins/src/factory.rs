use std::path::{Path, PathBuf};

use prospector_core::config::AppConfig;
use prospector_core::source::{RecordSink, RecordSource};

use crate::sink::{ExportFileWriter, JsonFileSink};
use crate::source::JsonFileSource;

/// The working set file: `path` when given, else the configured one.
pub fn working_set_path(cfg: &AppConfig, path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.data.working_set_path())
}

/// The working set may not exist yet; the first save creates it.
pub fn build_working_set_source(cfg: &AppConfig, path: Option<&Path>) -> Box<dyn RecordSource> {
    Box::new(JsonFileSource::new(working_set_path(cfg, path)).allow_missing())
}

pub fn build_working_set_sink(cfg: &AppConfig, path: Option<&Path>) -> Box<dyn RecordSink> {
    Box::new(JsonFileSink::new(working_set_path(cfg, path)))
}

/// Sources named explicitly (e.g. a survey batch) must exist.
pub fn build_source(path: &Path) -> Box<dyn RecordSource> {
    Box::new(JsonFileSource::new(path))
}

pub fn build_export_writer(cfg: &AppConfig) -> ExportFileWriter {
    ExportFileWriter::new(
        cfg.export.directory_or(&cfg.data),
        cfg.export.basename.clone(),
    )
}
