use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::annotate::{ANALYSIS_KEY, MINED_KEY};
use crate::workflow::{Stage, StageTransition, WorkflowVariant};

use super::date::{parse_date, serde_date};
use super::id::derive_record_id;

pub const CONFIDENCE_MIN: f64 = 0.0;
pub const CONFIDENCE_MAX: f64 = 100.0;

/// JSON keys owned by [`Record`] itself; everything else lives in `fields`.
pub const RESERVED_KEYS: [&str; 11] = [
    "articleID",
    "id",
    "title",
    "company",
    "excerpt",
    "content",
    "url",
    "location",
    "confidence",
    "date",
    "stage",
];

/// A lead under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "articleID")]
    pub id: String,
    pub title: String,
    pub company: String,
    /// Free-text summary of the article
    #[serde(rename = "excerpt", alias = "content")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Lead quality in `0..=100`
    pub confidence: f64,
    #[serde(with = "serde_date")]
    pub date: NaiveDateTime,
    pub stage: Stage,
    /// Extracted and augmented fields accumulated while mining
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn is_analyzed(&self) -> bool {
        self.fields.contains_key(ANALYSIS_KEY)
    }

    pub fn is_mined(&self) -> bool {
        self.fields.contains_key(MINED_KEY)
    }
}

pub fn validate_confidence(value: f64) -> Result<f64, String> {
    if !value.is_finite() {
        return Err(format!("confidence must be a finite number, got {value}"));
    }
    if !(CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&value) {
        return Err(format!(
            "confidence {value} outside {CONFIDENCE_MIN}..={CONFIDENCE_MAX}"
        ));
    }
    Ok(value)
}

/// Field keys become CSV and XLSX header cells, so each must be a single
/// printable line.
pub fn validate_field_keys(fields: &BTreeMap<String, Value>) -> Result<(), String> {
    match fields.keys().find(|k| k.trim().is_empty() || k.chars().any(char::is_control)) {
        Some(key) => Err(format!(
            "field key {key:?} must be non-empty and free of control characters"
        )),
        None => Ok(()),
    }
}

/// A record as it arrives from a source: every attribute optional, stage not
/// yet checked against the active workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(rename = "articleID", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "excerpt", alias = "content", default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RecordDraft {
    /// Validates the draft and fills defaults. Records without a stage start
    /// at the first stage of `variant`.
    pub fn into_record(self, variant: WorkflowVariant) -> Result<Record, String> {
        let id = match self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => id.to_string(),
            None => derive_record_id(self.url.as_deref()),
        };

        let raw_date = self
            .date
            .as_deref()
            .ok_or_else(|| format!("record {id} has no date"))?;
        let date =
            parse_date(raw_date).ok_or_else(|| format!("record {id} has unparseable date '{raw_date}'"))?;

        let confidence = validate_confidence(self.confidence.unwrap_or(CONFIDENCE_MIN))
            .map_err(|e| format!("record {id}: {e}"))?;

        let stage = match self.stage.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let stage: Stage = raw.parse().map_err(|e| format!("record {id}: {e}"))?;
                StageTransition::ensure_member(variant, stage)
                    .map_err(|e| format!("record {id}: {e}"))?;
                stage
            }
            None => variant.stages()[0],
        };

        validate_field_keys(&self.fields).map_err(|e| format!("record {id}: {e}"))?;

        Ok(Record {
            id,
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            url: self.url,
            location: self.location,
            confidence,
            date,
            stage,
            fields: self.fields,
        })
    }
}

impl From<Record> for RecordDraft {
    fn from(record: Record) -> Self {
        Self {
            id: Some(record.id),
            title: Some(record.title),
            company: Some(record.company),
            content: Some(record.content),
            url: record.url,
            location: record.location,
            confidence: Some(record.confidence),
            date: Some(super::date::format_date(&record.date)),
            stage: Some(record.stage.to_string()),
            fields: record.fields,
        }
    }
}
