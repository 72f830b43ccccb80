use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ordering for a stable sort; equal keys compare `Equal` in both directions.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Confidence => a.confidence.total_cmp(&b.confidence),
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "confidence" => Ok(SortKey::Confidence),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Confidence".parse::<SortKey>().unwrap(), SortKey::Confidence);
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert!("size".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_direction_serde_aliases() {
        let d: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(d, SortDirection::Descending);
        let d: SortDirection = serde_json::from_str("\"ascending\"").unwrap();
        assert_eq!(d, SortDirection::Ascending);
    }
}
