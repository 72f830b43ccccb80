//! Human annotations layered onto a record's extracted fields.
//!
//! Mining results and reviewer analysis are stored under fixed keys of
//! [`Record::fields`](crate::record::Record) so they survive any source or
//! export format that carries the fields map.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::record::format_date;
use crate::record::types::{validate_confidence, RESERVED_KEYS};

pub const ANALYSIS_KEY: &str = "analysis";
pub const MINING_KEY: &str = "mining";
pub const MINED_KEY: &str = "mined";

pub const SCORE_MAX: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
    Mixed,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            "mixed" => Ok(Sentiment::Mixed),
            other => Err(format!("unknown sentiment: {other}")),
        }
    }
}

/// The mining form: what a reviewer extracted from an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningNotes {
    #[serde(default)]
    pub key_entities: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    /// 0..=10
    pub relevance: u8,
    /// 0..=10
    pub potential_value: u8,
    #[serde(default)]
    pub notes: String,
}

impl Default for MiningNotes {
    fn default() -> Self {
        Self {
            key_entities: Vec::new(),
            topics: Vec::new(),
            sentiment: Sentiment::Neutral,
            relevance: 5,
            potential_value: 5,
            notes: String::new(),
        }
    }
}

impl MiningNotes {
    pub fn validate(&self) -> Result<(), String> {
        if self.relevance > SCORE_MAX {
            return Err(format!(
                "relevance {} outside 0..={SCORE_MAX}",
                self.relevance
            ));
        }
        if self.potential_value > SCORE_MAX {
            return Err(format!(
                "potential value {} outside 0..={SCORE_MAX}",
                self.potential_value
            ));
        }
        Ok(())
    }
}

/// A reviewer's assessment of a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub analysis_confidence: f64,
    pub original_confidence: f64,
    pub analysis_explanation: String,
    pub analysis_date: String,
}

impl Analysis {
    pub fn new(
        confidence: f64,
        original_confidence: f64,
        explanation: impl Into<String>,
        at: NaiveDateTime,
    ) -> Result<Self, String> {
        validate_confidence(confidence)?;
        Ok(Self {
            analysis_confidence: confidence,
            original_confidence,
            analysis_explanation: explanation.into(),
            analysis_date: format_date(&at),
        })
    }
}

/// Field keys written by annotations must not shadow record attributes.
pub fn validate_field_key(key: &str) -> Result<&str, String> {
    let key = key.trim();
    if key.is_empty() {
        return Err("field key must not be empty".to_string());
    }
    if key.chars().any(char::is_control) {
        return Err(format!("field key {key:?} must not contain control characters"));
    }
    if RESERVED_KEYS.contains(&key) {
        return Err(format!("field key '{key}' is a reserved record attribute"));
    }
    Ok(key)
}

/// Parses `key=value`; the value is read as JSON when it parses, otherwise kept as text.
pub fn parse_field_assignment(raw: &str) -> Result<(String, Value), String> {
    let (k, v) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid field assignment '{raw}' (expected KEY=VALUE)"))?;
    let key = validate_field_key(k)?.to_string();
    let v = v.trim();
    let value = serde_json::from_str::<Value>(v).unwrap_or_else(|_| Value::String(v.to_string()));
    Ok((key, value))
}
