use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::{ExportFormat, ExportOptions, DEFAULT_SHEET_NAME};
use crate::view::{SortDirection, SortKey};
use crate::workflow::WorkflowVariant;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// `[logging] directory`, or `logs/` inside the data directory.
    pub fn log_directory(&self) -> PathBuf {
        match self
            .logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            Some(dir) => PathBuf::from(dir),
            None => Path::new(&self.data.directory).join("logs"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a daily file under `directory` (or `<data dir>/logs` if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "prospector_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub variant: WorkflowVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_directory")]
    pub directory: String,

    /// File name of the persisted working set inside `directory`.
    #[serde(default = "default_working_set")]
    pub working_set: String,
}

fn default_data_directory() -> String {
    "data".to_string()
}

fn default_working_set() -> String {
    "prospects.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_data_directory(),
            working_set: default_working_set(),
        }
    }
}

impl DataConfig {
    pub fn working_set_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.working_set)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory; the data directory when unset.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default = "default_export_basename")]
    pub basename: String,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_export_format")]
    pub default_format: ExportFormat,
}

fn default_export_basename() -> String {
    "final-collection".to_string()
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Json
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            basename: default_export_basename(),
            sheet_name: default_sheet_name(),
            default_format: default_export_format(),
        }
    }
}

impl ExportConfig {
    pub fn directory_or<'a>(&'a self, data: &'a DataConfig) -> &'a str {
        self.directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&data.directory)
    }

    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.sheet_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Sort applied before any command-line sort; insertion order when unset.
    #[serde(default)]
    pub sort_key: Option<SortKey>,

    #[serde(default)]
    pub sort_direction: SortDirection,
}
