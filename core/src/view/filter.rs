use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::record::Record;
use crate::workflow::Stage;

/// How the company predicate compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyMatch {
    /// Exact, case-sensitive equality
    Exact(String),
    /// Case-insensitive substring
    Contains(String),
}

impl CompanyMatch {
    pub fn matches(&self, company: &str) -> bool {
        match self {
            CompanyMatch::Exact(wanted) => company == wanted,
            CompanyMatch::Contains(needle) => company
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Inclusive range; an open end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Whole calendar days from `first` through `last`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: Some(first.and_time(NaiveTime::MIN)),
            end: Some(end_of_day(last)),
        }
    }

    /// Like [`days`](Self::days) with either end optional.
    pub fn between(first: Option<NaiveDate>, last: Option<NaiveDate>) -> Self {
        Self {
            start: first.map(|d| d.and_time(NaiveTime::MIN)),
            end: last.map(end_of_day),
        }
    }

    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        self.start.map_or(true, |s| *at >= s) && self.end.map_or(true, |e| *at <= e)
    }
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Relative date windows offered by the review screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
}

impl DatePreset {
    pub fn resolve(self, now: NaiveDateTime) -> DateRange {
        let today = now.date();
        match self {
            DatePreset::Today => DateRange::days(today, today),
            DatePreset::Yesterday => {
                let yesterday = today - Duration::days(1);
                DateRange::days(yesterday, yesterday)
            }
            DatePreset::Last7Days => DateRange {
                start: Some((today - Duration::days(7)).and_time(NaiveTime::MIN)),
                end: None,
            },
        }
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DatePreset::Today),
            "yesterday" => Ok(DatePreset::Yesterday),
            "last-7-days" | "last7days" | "week" => Ok(DatePreset::Last7Days),
            other => Err(format!("unknown date preset: {other}")),
        }
    }
}

/// Active filter predicates; unset predicates match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub company: Option<CompanyMatch>,
    pub min_confidence: Option<f64>,
    pub date_range: Option<DateRange>,
    pub stage: Option<Stage>,
    /// `Some(true)` keeps only reviewed records, `Some(false)` only unreviewed.
    pub analyzed: Option<bool>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.min_confidence.is_none()
            && self.date_range.is_none()
            && self.stage.is_none()
            && self.analyzed.is_none()
    }

    pub fn with_company(mut self, company: CompanyMatch) -> Self {
        self.company = Some(company);
        self
    }

    pub fn with_min_confidence(mut self, threshold: f64) -> Self {
        self.min_confidence = Some(threshold);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_analyzed(mut self, analyzed: bool) -> Self {
        self.analyzed = Some(analyzed);
        self
    }

    /// Logical AND over every active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(company) = &self.company {
            if !company.matches(&record.company) {
                return false;
            }
        }
        if let Some(threshold) = self.min_confidence {
            if record.confidence < threshold {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if !range.contains(&record.date) {
                return false;
            }
        }
        if let Some(stage) = self.stage {
            if record.stage != stage {
                return false;
            }
        }
        if let Some(analyzed) = self.analyzed {
            if record.is_analyzed() != analyzed {
                return false;
            }
        }
        true
    }
}
