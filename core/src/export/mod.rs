//! Serializing record sets to flat-file formats.

pub mod columns;
pub mod csv;
pub mod json;
pub mod xlsx;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LeadError;
use crate::record::Record;

pub use self::csv::CsvExporter;
pub use self::json::JsonExporter;
pub use self::xlsx::XlsxExporter;

pub const DEFAULT_SHEET_NAME: &str = "Leads";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(LeadError::Export(format!("unsupported export format: {other}"))),
        }
    }
}

/// Knobs shared by the exporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub sheet_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

pub trait RecordExporter {
    fn format(&self) -> ExportFormat;

    fn export(&self, records: &[&Record]) -> Result<Vec<u8>, LeadError>;
}

pub fn build_exporter(format: ExportFormat, options: &ExportOptions) -> Box<dyn RecordExporter> {
    match format {
        ExportFormat::Json => Box::new(JsonExporter),
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Xlsx => Box::new(XlsxExporter::new(options.sheet_name.clone())),
    }
}
