//! CLI assembly: config overrides, working-set load/save and view flags.
use chrono::NaiveDateTime;
use std::path::PathBuf;

use prospector_core::api as core_api;
use prospector_core::api::{
    CliError, CompanyMatch, DateRange, ErrorKind, FilterCriteria, LeadError, Session,
    SortDirection, ViewController,
};
use prospector_plugins::factory;
use prospector_plugins::sink::ExportFileWriter;

use crate::commands::cli::{Args, ViewArgs};

pub struct AppContext {
    cfg: core_api::AppConfig,
    data: Option<PathBuf>,
}

impl AppContext {
    /// Applies the global command-line overrides to `cfg`.
    pub fn new(mut cfg: core_api::AppConfig, args: &Args) -> Self {
        if let Some(variant) = args.variant {
            cfg.workflow.variant = variant;
        }
        Self {
            cfg,
            data: args.data.clone(),
        }
    }

    pub fn cfg(&self) -> &core_api::AppConfig {
        &self.cfg
    }

    pub fn working_set(&self) -> PathBuf {
        factory::working_set_path(&self.cfg, self.data.as_deref())
    }

    #[tracing::instrument(name = "cli.open_session", skip(self))]
    pub fn open_session(&self) -> Result<Session, CliError> {
        let mut session = Session::from_config(&self.cfg);
        let source = factory::build_working_set_source(&self.cfg, self.data.as_deref());
        session.load(source.as_ref())?;
        Ok(session)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), CliError> {
        let sink = factory::build_working_set_sink(&self.cfg, self.data.as_deref());
        session.save(sink.as_ref())?;
        Ok(())
    }

    pub fn export_writer(&self) -> ExportFileWriter {
        factory::build_export_writer(&self.cfg)
    }
}

pub fn filter_from_args(args: &ViewArgs, now: NaiveDateTime) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();

    if let Some(name) = &args.company {
        criteria = criteria.with_company(CompanyMatch::Exact(name.clone()));
    } else if let Some(fragment) = &args.company_contains {
        criteria = criteria.with_company(CompanyMatch::Contains(fragment.clone()));
    }
    if let Some(threshold) = args.min_confidence {
        criteria = criteria.with_min_confidence(threshold);
    }
    if let Some(preset) = args.date {
        criteria = criteria.with_date_range(preset.resolve(now));
    } else if args.from.is_some() || args.to.is_some() {
        criteria = criteria.with_date_range(DateRange::between(args.from, args.to));
    }
    if let Some(stage) = args.stage {
        criteria = criteria.with_stage(stage);
    }
    if args.analyzed {
        criteria = criteria.with_analyzed(true);
    } else if args.not_analyzed {
        criteria = criteria.with_analyzed(false);
    }

    criteria
}

/// Replaces the view's filter and, when asked, its sort. A bare `--asc` or
/// `--desc` flips the direction of the configured default sort.
pub fn apply_view_args(view: &mut ViewController, args: &ViewArgs, now: NaiveDateTime) {
    view.set_filter(filter_from_args(args, now));

    let direction = if args.asc {
        Some(SortDirection::Ascending)
    } else if args.desc {
        Some(SortDirection::Descending)
    } else {
        None
    };

    match (args.sort, view.sort()) {
        (Some(key), _) => view.set_sort(key, direction.unwrap_or_default()),
        (None, Some(current)) => {
            if let Some(direction) = direction {
                view.set_sort(current.key, direction);
            }
        }
        (None, None) => {}
    }
}

/// Current time on the same clock as stored record dates, which are
/// normalized to UTC on load.
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

// 0: success
// 11: config error
// 20: load / save / IO error
// 30: record not found
// 31: invalid stage transition
// 32: validation error
// 40: export error
// 50: internal/uncategorized
pub fn exit_code_for_error(e: &CliError) -> i32 {
    match e {
        CliError::Config(_) => 11,
        CliError::Lead(le) => exit_code_for_lead(le),
        CliError::Io(_) => 20,
        CliError::Command(_) => 50,
        CliError::Anyhow(_) => 50,
    }
}

pub fn exit_code_for_lead(e: &LeadError) -> i32 {
    match e.kind() {
        ErrorKind::Load | ErrorKind::Save => 20,
        kind => i32::from(kind.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prospector_core::api::{SortKey, SortSpec, Stage};

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_filter_from_args() {
        let args = ViewArgs {
            company_contains: Some("acme".into()),
            min_confidence: Some(60.0),
            from: NaiveDate::from_ymd_opt(2025, 5, 1),
            stage: Some(Stage::Mining),
            not_analyzed: true,
            ..Default::default()
        };
        let criteria = filter_from_args(&args, noon(2025, 5, 20));

        assert_eq!(criteria.company, Some(CompanyMatch::Contains("acme".into())));
        assert_eq!(criteria.min_confidence, Some(60.0));
        assert_eq!(criteria.stage, Some(Stage::Mining));
        assert_eq!(criteria.analyzed, Some(false));
        let range = criteria.date_range.unwrap();
        assert!(range.contains(&noon(2025, 5, 1)));
        assert!(!range.contains(&noon(2025, 4, 30)));
        assert!(range.end.is_none());
    }

    #[test]
    fn test_now_is_utc() {
        let before = chrono::Utc::now().naive_utc();
        let current = now();
        let after = chrono::Utc::now().naive_utc();
        assert!(before <= current && current <= after);
    }

    #[test]
    fn test_today_preset_matches_utc_stamped_record() {
        let stamped = prospector_core::api::parse_date("2025-05-20T23:30:00-02:00").unwrap();
        let args = ViewArgs {
            date: Some(prospector_core::api::DatePreset::Today),
            ..Default::default()
        };
        let criteria = filter_from_args(&args, noon(2025, 5, 21));
        assert!(criteria.date_range.unwrap().contains(&stamped));
    }

    #[test]
    fn test_empty_args_clear_filter() {
        assert!(filter_from_args(&ViewArgs::default(), noon(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_sort_flags() {
        let mut view = ViewController::default();

        apply_view_args(
            &mut view,
            &ViewArgs {
                sort: Some(SortKey::Date),
                ..Default::default()
            },
            noon(2025, 1, 1),
        );
        assert_eq!(
            view.sort(),
            Some(SortSpec::new(SortKey::Date, SortDirection::Descending))
        );

        apply_view_args(
            &mut view,
            &ViewArgs {
                asc: true,
                ..Default::default()
            },
            noon(2025, 1, 1),
        );
        assert_eq!(
            view.sort(),
            Some(SortSpec::new(SortKey::Date, SortDirection::Ascending))
        );

        let mut unsorted = ViewController::default();
        apply_view_args(
            &mut unsorted,
            &ViewArgs {
                desc: true,
                ..Default::default()
            },
            noon(2025, 1, 1),
        );
        assert_eq!(unsorted.sort(), None);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for_error(&CliError::Config("x".into())), 11);
        assert_eq!(
            exit_code_for_error(&LeadError::load("f.json", "missing").into()),
            20
        );
        assert_eq!(
            exit_code_for_error(&LeadError::save("f.json", "read-only").into()),
            20
        );
        assert_eq!(
            exit_code_for_error(&LeadError::NotFound("a".into()).into()),
            30
        );
        assert_eq!(
            exit_code_for_error(&LeadError::Validation("bad".into()).into()),
            32
        );
        assert_eq!(
            exit_code_for_error(&LeadError::Export("bad".into()).into()),
            40
        );
        assert_eq!(
            exit_code_for_error(&CliError::Command("boom".into())),
            50
        );
    }
}
