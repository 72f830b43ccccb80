//! Filtered, sorted views over the record store and export dispatch.

pub mod filter;
pub mod sort;

pub use filter::{CompanyMatch, DatePreset, DateRange, FilterCriteria};
pub use sort::{SortDirection, SortKey, SortSpec};

use crate::error::LeadError;
use crate::export::{build_exporter, ExportFormat, ExportOptions};
use crate::record::Record;
use crate::store::RecordStore;

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    filter: FilterCriteria,
    sort: Option<SortSpec>,
    export: ExportOptions,
}

impl ViewController {
    pub fn new(export: ExportOptions) -> Self {
        Self {
            filter: FilterCriteria::default(),
            sort: None,
            export,
        }
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        tracing::debug!(?criteria, "filter replaced");
        self.filter = criteria;
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        tracing::debug!(?key, ?direction, "sort replaced");
        self.sort = Some(SortSpec::new(key, direction));
    }

    /// Back to insertion order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Records passing every active predicate, in the active sort order.
    /// Ties, and the unsorted case, keep insertion order.
    pub fn visible_records<'a>(&self, store: &'a RecordStore) -> Vec<&'a Record> {
        let mut visible: Vec<&Record> = store
            .get_all()
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect();

        if let Some(order) = self.sort {
            // slice::sort_by is stable
            visible.sort_by(|a, b| order.compare(a, b));
        }

        tracing::debug!(
            total = store.len(),
            visible = visible.len(),
            "view evaluated"
        );
        visible
    }

    pub fn export(&self, format: ExportFormat, records: &[&Record]) -> Result<Vec<u8>, LeadError> {
        let exporter = build_exporter(format, &self.export);
        let bytes = exporter.export(records).map_err(|e| {
            tracing::warn!(%format, error = %e, "export failed");
            e
        })?;
        tracing::info!(%format, records = records.len(), bytes = bytes.len(), "records exported");
        Ok(bytes)
    }

    /// Parses `format` first, so an unknown name fails as an export error.
    pub fn export_named(&self, format: &str, records: &[&Record]) -> Result<Vec<u8>, LeadError> {
        self.export(format.parse()?, records)
    }
}
