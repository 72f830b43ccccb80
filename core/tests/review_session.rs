mod common;

use common::{ids, leads, JsonSource, SnapshotSink};
use pretty_assertions::assert_eq;
use prospector_core::api::{
    AppConfig, CompanyMatch, DateRange, ExportFormat, FilterCriteria, LeadError, MiningNotes,
    RecordDraft, Session, SortDirection, SortKey, Stage, TransitionError, WorkflowVariant,
};
use serde_json::json;

fn session() -> Session {
    let mut s = Session::from_config(&AppConfig::default());
    assert_eq!(s.load(&JsonSource(leads())).unwrap(), 4);
    s
}

fn at(day: u32) -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 5, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[test]
fn lead_moves_from_surveying_to_collecting() {
    let mut s = session();
    assert_eq!(s.get("art-001").unwrap().stage, Stage::Surveying);

    assert_eq!(s.advance("art-001").unwrap(), Stage::Prospecting);
    s.analyze("art-001", 80.0, "confirmed hiring plan", at(15))
        .unwrap();
    assert_eq!(s.advance("art-001").unwrap(), Stage::Mining);
    s.mine(
        "art-001",
        MiningNotes {
            key_entities: vec!["Acme Logistics".into()],
            topics: vec!["warehousing".into()],
            relevance: 9,
            potential_value: 7,
            ..Default::default()
        },
        at(16),
    )
    .unwrap();
    assert_eq!(s.advance("art-001").unwrap(), Stage::Collecting);

    let err = s.advance("art-001").unwrap_err();
    assert!(matches!(
        err,
        LeadError::InvalidTransition {
            cause: TransitionError::FromTerminalState { .. },
            ..
        }
    ));

    let rec = s.get("art-001").unwrap();
    assert_eq!(rec.stage, Stage::Collecting);
    assert_eq!(rec.confidence, 80.0);
    assert!(rec.is_analyzed());
    assert!(rec.is_mined());
    assert_eq!(rec.fields["sector"], json!("logistics"));
}

#[test]
fn errors_leave_the_session_usable() {
    let mut s = session();

    assert!(matches!(s.advance("missing"), Err(LeadError::NotFound(_))));
    assert!(matches!(
        s.set_confidence("art-002", 250.0),
        Err(LeadError::Validation(_))
    ));
    assert!(s.export_visible(ExportFormat::Json).is_ok());

    assert_eq!(s.advance("art-002").unwrap(), Stage::Prospecting);
    assert_eq!(s.get("art-002").unwrap().confidence, 91.0);
}

#[test]
fn filtered_and_sorted_view() {
    let mut s = session();

    s.view_mut().set_filter(
        FilterCriteria::default().with_company(CompanyMatch::Exact("Acme".into())),
    );
    assert_eq!(ids(&s.visible_records()), vec!["art-001"]);

    s.view_mut().set_filter(
        FilterCriteria::default()
            .with_company(CompanyMatch::Contains("ACME".into()))
            .with_date_range(DateRange::days(
                chrono::NaiveDate::from_ymd_opt(2025, 5, 11).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            )),
    );
    assert_eq!(ids(&s.visible_records()), vec!["art-001"]);

    s.view_mut().set_filter(FilterCriteria::default());
    s.view_mut()
        .set_sort(SortKey::Confidence, SortDirection::Descending);
    assert_eq!(
        ids(&s.visible_records()),
        vec!["art-002", "art-004", "art-001", "art-003"]
    );

    s.view_mut().set_sort(SortKey::Date, SortDirection::Ascending);
    assert_eq!(
        ids(&s.visible_records()),
        vec!["art-003", "art-001", "art-004", "art-002"]
    );
}

#[test]
fn json_export_reloads_to_identical_records() {
    let mut s = session();
    s.set_field("art-004", "contact", json!({"name": "P. Gibbons"}))
        .unwrap();
    let bytes = s.export_visible(ExportFormat::Json).unwrap();

    let drafts: Vec<RecordDraft> = serde_json::from_slice(&bytes).unwrap();
    let mut reloaded = Session::from_config(&AppConfig::default());
    reloaded
        .load(&JsonSource(serde_json::to_value(drafts).unwrap()))
        .unwrap();

    assert_eq!(reloaded.store().get_all(), s.store().get_all());
}

#[test]
fn csv_export_has_header_plus_one_line_per_visible_record() {
    let mut s = session();
    s.set_field("art-002", "notes", json!("line one\nline two"))
        .unwrap();
    s.view_mut()
        .set_filter(FilterCriteria::default().with_min_confidence(50.0));

    let csv = String::from_utf8(s.export_visible(ExportFormat::Csv).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 3 + 1);
    assert!(csv.starts_with("articleID,title,company,excerpt,url,location,confidence,date,stage"));
}

#[test]
fn save_persists_every_record_regardless_of_view() {
    let mut s = session();
    s.view_mut()
        .set_filter(FilterCriteria::default().with_stage(Stage::Prospecting));
    assert_eq!(s.visible_records().len(), 1);

    let sink = SnapshotSink::default();
    s.save(&sink).unwrap();
    assert_eq!(sink.saved.borrow().as_ref().map(Vec::len), Some(4));
}

#[test]
fn three_stage_variant_rejects_surveying() {
    let mut cfg = AppConfig::default();
    cfg.workflow.variant = WorkflowVariant::Three;
    let mut s = Session::from_config(&cfg);

    let err = s
        .load(&JsonSource(json!([
            {"articleID": "x", "date": "2025-05-01", "stage": "surveying"}
        ])))
        .unwrap_err();
    assert!(matches!(err, LeadError::Load { .. }));
    assert!(s.store().is_empty());
}
