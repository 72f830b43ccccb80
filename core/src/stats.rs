//! Summary figures for a set of leads.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::record::Record;
use crate::workflow::Stage;

pub const CONFIDENCE_BUCKETS: [&str; 5] = ["0-20", "21-40", "41-60", "61-80", "81-100"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCount {
    pub company: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub range: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub average_confidence: Option<f64>,
    pub analyzed: usize,
    pub mined: usize,
    pub stages: Vec<StageCount>,
    pub companies: Vec<CompanyCount>,
    pub confidence: Vec<BucketCount>,
    pub dates: Vec<DateCount>,
}

/// Buckets are `[0,20) [20,40) [40,60) [60,80) [80,100]`.
pub fn confidence_bucket(confidence: f64) -> usize {
    ((confidence / 20.0).floor().max(0.0) as usize).min(CONFIDENCE_BUCKETS.len() - 1)
}

pub fn compute(records: &[&Record], stages: &[Stage]) -> Stats {
    let total = records.len();

    let average_confidence = (total > 0)
        .then(|| records.iter().map(|r| r.confidence).sum::<f64>() / total as f64);

    let mut per_stage: HashMap<Stage, usize> = HashMap::new();
    let mut per_company: HashMap<&str, usize> = HashMap::new();
    let mut per_bucket = [0usize; CONFIDENCE_BUCKETS.len()];
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut analyzed = 0;
    let mut mined = 0;

    for r in records {
        *per_stage.entry(r.stage).or_default() += 1;
        let company = r.company.trim();
        if !company.is_empty() {
            *per_company.entry(company).or_default() += 1;
        }
        per_bucket[confidence_bucket(r.confidence)] += 1;
        *per_day.entry(r.date.date()).or_default() += 1;
        analyzed += usize::from(r.is_analyzed());
        mined += usize::from(r.is_mined());
    }

    let mut companies: Vec<CompanyCount> = per_company
        .into_iter()
        .map(|(company, count)| CompanyCount {
            company: company.to_string(),
            count,
        })
        .collect();
    companies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.company.cmp(&b.company)));

    Stats {
        total,
        average_confidence,
        analyzed,
        mined,
        stages: stages
            .iter()
            .map(|stage| StageCount {
                stage: *stage,
                count: per_stage.get(stage).copied().unwrap_or(0),
            })
            .collect(),
        companies,
        confidence: CONFIDENCE_BUCKETS
            .iter()
            .zip(per_bucket)
            .map(|(range, count)| BucketCount { range: *range, count })
            .collect(),
        dates: per_day
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect(),
    }
}

pub fn format_text(stats: &Stats) -> String {
    let mut out = String::new();

    out.push_str("Lead statistics\n");
    out.push_str(&format!("total: {}\n", stats.total));
    match stats.average_confidence {
        Some(avg) => out.push_str(&format!("average_confidence: {avg:.0}%\n")),
        None => out.push_str("average_confidence: n/a\n"),
    }
    out.push_str(&format!("analyzed: {}/{}\n", stats.analyzed, stats.total));
    out.push_str(&format!("mined: {}/{}\n", stats.mined, stats.total));

    out.push_str("stages:\n");
    for s in &stats.stages {
        out.push_str(&format!("  {}: {}\n", s.stage, s.count));
    }

    out.push_str("companies:\n");
    if stats.companies.is_empty() {
        out.push_str("  (none)\n");
    }
    for c in &stats.companies {
        out.push_str(&format!("  {}: {}\n", c.company, c.count));
    }

    out.push_str("confidence:\n");
    for b in &stats.confidence {
        out.push_str(&format!("  {}: {}\n", b.range, b.count));
    }

    out.push_str("dates:\n");
    for d in &stats.dates {
        out.push_str(&format!("  {}: {}\n", d.date, d.count));
    }

    out
}
