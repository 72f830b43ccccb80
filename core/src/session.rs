//! One review session: the working set, the active workflow and the current view.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::annotate::{
    validate_field_key, Analysis, MiningNotes, ANALYSIS_KEY, MINED_KEY, MINING_KEY,
};
use crate::config::AppConfig;
use crate::error::LeadError;
use crate::export::ExportFormat;
use crate::record::types::validate_confidence;
use crate::record::{format_date, Record};
use crate::source::{RecordSink, RecordSource};
use crate::stats::{self, Stats};
use crate::store::{MergeReport, RecordStore};
use crate::view::ViewController;
use crate::workflow::{AdvanceOutcome, Stage, WorkflowManager, WorkflowVariant};

#[derive(Debug, Default)]
pub struct Session {
    store: RecordStore,
    workflow: WorkflowManager,
    view: ViewController,
}

impl Session {
    pub fn new(workflow: WorkflowManager, view: ViewController) -> Self {
        Self {
            store: RecordStore::with_variant(workflow.variant()),
            workflow,
            view,
        }
    }

    /// Empty session with the workflow variant, export options and default
    /// sort taken from `cfg`.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let mut view = ViewController::new(cfg.export.options());
        if let Some(key) = cfg.view.sort_key {
            view.set_sort(key, cfg.view.sort_direction);
        }
        Self::new(WorkflowManager::new(cfg.workflow.variant), view)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn workflow(&self) -> &WorkflowManager {
        &self.workflow
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.workflow.variant()
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    pub fn load(&mut self, source: &dyn RecordSource) -> Result<usize, LeadError> {
        self.store.load(source, self.workflow.variant())
    }

    /// Brings newly surveyed records into the working set.
    pub fn survey(&mut self, source: &dyn RecordSource) -> Result<MergeReport, LeadError> {
        self.store.merge(source, self.workflow.variant())
    }

    pub fn save(&self, sink: &dyn RecordSink) -> Result<(), LeadError> {
        sink.save(self.store.get_all())?;
        tracing::info!(target = %sink.describe(), count = self.store.len(), "working set saved");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&Record, LeadError> {
        self.store.get(id)
    }

    pub fn visible_records(&self) -> Vec<&Record> {
        self.view.visible_records(&self.store)
    }

    pub fn advance(&mut self, id: &str) -> Result<Stage, LeadError> {
        self.workflow.advance(&mut self.store, id)
    }

    pub fn advance_all<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<AdvanceOutcome> {
        self.workflow.advance_all(&mut self.store, ids)
    }

    pub fn set_stage(&mut self, id: &str, stage: Stage) -> Result<Stage, LeadError> {
        self.workflow.set_stage(&mut self.store, id, stage)
    }

    pub fn set_confidence(&mut self, id: &str, value: f64) -> Result<(), LeadError> {
        let value = validate_confidence(value).map_err(|e| self.rejected(id, e))?;
        self.store.update(id, |r| r.confidence = value)?;
        tracing::info!(record = %id, confidence = value, "confidence set");
        Ok(())
    }

    pub fn set_field(&mut self, id: &str, key: &str, value: Value) -> Result<(), LeadError> {
        let key = validate_field_key(key)
            .map_err(|e| self.rejected(id, e))?
            .to_string();
        self.store.update(id, |r| {
            r.fields.insert(key.clone(), value);
        })?;
        tracing::info!(record = %id, field = %key, "field set");
        Ok(())
    }

    /// Returns the removed value, if the field was present.
    pub fn remove_field(&mut self, id: &str, key: &str) -> Result<Option<Value>, LeadError> {
        let key = validate_field_key(key).map_err(|e| self.rejected(id, e))?;
        let mut removed = None;
        self.store.update(id, |r| removed = r.fields.remove(key))?;
        if removed.is_some() {
            tracing::info!(record = %id, field = %key, "field removed");
        }
        Ok(removed)
    }

    pub fn mine(&mut self, id: &str, notes: MiningNotes, at: NaiveDateTime) -> Result<(), LeadError> {
        notes.validate().map_err(|e| self.rejected(id, e))?;
        let value = serde_json::to_value(&notes)
            .map_err(|e| LeadError::Validation(format!("mining notes: {e}")))?;
        self.store.update(id, |r| {
            r.fields.insert(MINING_KEY.to_string(), value);
            r.fields
                .insert(MINED_KEY.to_string(), Value::String(format_date(&at)));
        })?;
        tracing::info!(
            record = %id,
            relevance = notes.relevance,
            potential_value = notes.potential_value,
            "record mined"
        );
        Ok(())
    }

    /// Records the reviewer's assessment and adopts its confidence.
    pub fn analyze(
        &mut self,
        id: &str,
        confidence: f64,
        explanation: &str,
        at: NaiveDateTime,
    ) -> Result<Analysis, LeadError> {
        let analysis = self.store.try_update(id, |r| {
            let analysis = Analysis::new(confidence, r.confidence, explanation, at)
                .map_err(|e| LeadError::Validation(format!("record {}: {e}", r.id)))?;
            let value = serde_json::to_value(&analysis)
                .map_err(|e| LeadError::Validation(format!("analysis: {e}")))?;
            r.fields.insert(ANALYSIS_KEY.to_string(), value);
            r.confidence = confidence;
            Ok(analysis)
        });
        match &analysis {
            Ok(a) => tracing::info!(
                record = %id,
                from = a.original_confidence,
                to = a.analysis_confidence,
                "record analyzed"
            ),
            Err(e) => tracing::warn!(record = %id, error = %e, "analysis rejected"),
        }
        analysis
    }

    pub fn export_visible(&self, format: ExportFormat) -> Result<Vec<u8>, LeadError> {
        self.view.export(format, &self.visible_records())
    }

    pub fn stats(&self) -> Stats {
        stats::compute(&self.visible_records(), self.workflow.stages())
    }

    fn rejected(&self, id: &str, reason: String) -> LeadError {
        tracing::warn!(record = %id, %reason, "edit rejected");
        LeadError::Validation(format!("record {id}: {reason}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordDraft;
    use crate::view::{FilterCriteria, SortDirection, SortKey};
    use serde_json::json;
    use std::cell::RefCell;

    struct Fixture(Value);

    impl RecordSource for Fixture {
        fn describe(&self) -> String {
            "fixture".into()
        }

        fn load(&self) -> Result<Vec<RecordDraft>, LeadError> {
            serde_json::from_value(self.0.clone()).map_err(|e| LeadError::load("fixture", e))
        }
    }

    #[derive(Default)]
    struct Capture(RefCell<Vec<Record>>);

    impl RecordSink for Capture {
        fn describe(&self) -> String {
            "capture".into()
        }

        fn save(&self, records: &[Record]) -> Result<(), LeadError> {
            *self.0.borrow_mut() = records.to_vec();
            Ok(())
        }
    }

    fn at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn session() -> Session {
        let mut s = Session::default();
        s.load(&Fixture(json!([
            {"articleID": "a", "company": "Acme", "confidence": 40, "date": "2025-06-01"},
            {"articleID": "b", "company": "Globex", "confidence": 75, "date": "2025-06-02"}
        ])))
        .unwrap();
        s
    }

    #[test]
    fn test_from_config_applies_variant_and_sort() {
        let mut cfg = AppConfig::default();
        cfg.workflow.variant = WorkflowVariant::Three;
        cfg.view.sort_key = Some(SortKey::Confidence);
        cfg.view.sort_direction = SortDirection::Descending;

        let mut s = Session::from_config(&cfg);
        s.load(&Fixture(json!([
            {"articleID": "a", "confidence": 10, "date": "2025-06-01"},
            {"articleID": "b", "confidence": 60, "date": "2025-06-01"}
        ])))
        .unwrap();

        assert_eq!(s.get("a").unwrap().stage, Stage::Prospecting);
        let ids: Vec<&str> = s.visible_records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_set_confidence_validates() {
        let mut s = session();
        s.set_confidence("a", 88.0).unwrap();
        assert_eq!(s.get("a").unwrap().confidence, 88.0);

        let err = s.set_confidence("a", 120.0).unwrap_err();
        assert!(matches!(err, LeadError::Validation(_)));
        assert_eq!(s.get("a").unwrap().confidence, 88.0);

        assert!(matches!(
            s.set_confidence("nope", 10.0),
            Err(LeadError::NotFound(_))
        ));
    }

    #[test]
    fn test_fields_set_and_remove() {
        let mut s = session();
        s.set_field("a", "contact", json!("ops@acme.example")).unwrap();
        assert_eq!(s.get("a").unwrap().fields["contact"], json!("ops@acme.example"));

        assert!(matches!(
            s.set_field("a", "stage", json!("x")),
            Err(LeadError::Validation(_))
        ));
        assert!(matches!(
            s.set_field("a", "multi\nline", json!(1)),
            Err(LeadError::Validation(_))
        ));
        assert_eq!(s.get("a").unwrap().fields.len(), 1);

        assert_eq!(
            s.remove_field("a", "contact").unwrap(),
            Some(json!("ops@acme.example"))
        );
        assert_eq!(s.remove_field("a", "contact").unwrap(), None);
    }

    #[test]
    fn test_mine_stamps_record() {
        let mut s = session();
        let notes = MiningNotes {
            key_entities: vec!["Acme".into()],
            relevance: 8,
            ..Default::default()
        };
        s.mine("a", notes, at()).unwrap();

        let rec = s.get("a").unwrap();
        assert!(rec.is_mined());
        assert_eq!(rec.fields[MINED_KEY], json!("2025-06-02T14:30:00"));
        assert_eq!(rec.fields[MINING_KEY]["relevance"], json!(8));

        let bad = MiningNotes {
            potential_value: 11,
            ..Default::default()
        };
        assert!(matches!(s.mine("b", bad, at()), Err(LeadError::Validation(_))));
        assert!(!s.get("b").unwrap().is_mined());
    }

    #[test]
    fn test_analyze_updates_confidence() {
        let mut s = session();
        let a = s.analyze("a", 65.0, "new warehouse announced", at()).unwrap();
        assert_eq!(a.original_confidence, 40.0);

        let rec = s.get("a").unwrap();
        assert_eq!(rec.confidence, 65.0);
        assert!(rec.is_analyzed());
        assert_eq!(
            rec.fields[ANALYSIS_KEY]["analysis_explanation"],
            json!("new warehouse announced")
        );

        assert!(s.analyze("a", -1.0, "x", at()).is_err());
        assert_eq!(s.get("a").unwrap().confidence, 65.0);
    }

    #[test]
    fn test_save_writes_whole_store_and_stats_follow_view() {
        let mut s = session();
        s.view_mut()
            .set_filter(FilterCriteria::default().with_min_confidence(50.0));

        let sink = Capture::default();
        s.save(&sink).unwrap();
        assert_eq!(sink.0.borrow().len(), 2);

        let stats = s.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.companies[0].company, "Globex");
    }

    #[test]
    fn test_survey_merges() {
        let mut s = session();
        let report = s
            .survey(&Fixture(json!([
                {"articleID": "b", "company": "Globex", "confidence": 80, "date": "2025-06-02"},
                {"articleID": "c", "company": "Initech", "confidence": 10, "date": "2025-06-03"}
            ])))
            .unwrap();
        assert_eq!(report, MergeReport { added: 1, updated: 1 });
        assert_eq!(s.store().len(), 3);
        assert_eq!(s.get("b").unwrap().confidence, 80.0);
    }
}
