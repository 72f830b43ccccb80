#![allow(dead_code)]

use prospector_core::api::{LeadError, Record, RecordDraft, RecordSink, RecordSource};
use serde_json::{json, Value};
use std::cell::RefCell;

/// Source backed by an in-test JSON value.
pub struct JsonSource(pub Value);

impl RecordSource for JsonSource {
    fn describe(&self) -> String {
        "test fixture".to_string()
    }

    fn load(&self) -> Result<Vec<RecordDraft>, LeadError> {
        serde_json::from_value(self.0.clone()).map_err(|e| LeadError::load("test fixture", e))
    }
}

/// Sink that keeps the last saved snapshot.
#[derive(Default)]
pub struct SnapshotSink {
    pub saved: RefCell<Option<Vec<Record>>>,
}

impl RecordSink for SnapshotSink {
    fn describe(&self) -> String {
        "snapshot".to_string()
    }

    fn save(&self, records: &[Record]) -> Result<(), LeadError> {
        *self.saved.borrow_mut() = Some(records.to_vec());
        Ok(())
    }
}

pub fn leads() -> Value {
    json!([
        {
            "articleID": "art-001",
            "title": "Acme opens distribution hub",
            "company": "Acme",
            "excerpt": "Acme Logistics will open a 40,000 sq ft hub, hiring 120.",
            "url": "https://news.example/acme-hub",
            "location": "Reno, NV",
            "confidence": 72,
            "date": "2025-05-12T08:15:00",
            "sector": "logistics"
        },
        {
            "articleID": "art-002",
            "title": "Globex expands battery line",
            "company": "Globex",
            "content": "Globex adds a second battery assembly line.",
            "confidence": 91,
            "date": "2025-05-14"
        },
        {
            "articleID": "art-003",
            "title": "Acme Corp eyes new plant",
            "company": "Acme Corp",
            "excerpt": "Site selection underway for a fabrication plant.",
            "confidence": 38.5,
            "date": "2025-05-10T17:40:00",
            "stage": "prospecting"
        },
        {
            "articleID": "art-004",
            "title": "Initech relocates HQ",
            "company": "Initech",
            "excerpt": "Initech moves headquarters downtown.",
            "confidence": 91,
            "date": "2025-05-13T11:00:00"
        }
    ])
}

pub fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}
