//! Tabular layout shared by the CSV and spreadsheet exporters.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::record::{format_date, Record};

pub const FIXED_COLUMNS: [&str; 9] = [
    "articleID",
    "title",
    "company",
    "excerpt",
    "url",
    "location",
    "confidence",
    "date",
    "stage",
];

/// Index of the confidence column in [`FIXED_COLUMNS`].
pub const CONFIDENCE_COLUMN: usize = 6;

/// Fixed columns followed by every extracted-field key present in `records`, sorted.
pub fn header(records: &[&Record]) -> (Vec<String>, Vec<String>) {
    let field_keys: Vec<String> = records
        .iter()
        .flat_map(|r| r.fields.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(field_keys.iter().cloned());
    (header, field_keys)
}

pub fn row(record: &Record, field_keys: &[String]) -> Vec<String> {
    let mut cells = vec![
        record.id.clone(),
        record.title.clone(),
        record.company.clone(),
        record.content.clone(),
        record.url.clone().unwrap_or_default(),
        record.location.clone().unwrap_or_default(),
        format_number(record.confidence),
        format_date(&record.date),
        record.stage.to_string(),
    ];
    cells.extend(
        field_keys
            .iter()
            .map(|key| record.fields.get(key).map(cell_text).unwrap_or_default()),
    );
    cells
}

/// Strings are written raw; any other JSON value as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}
