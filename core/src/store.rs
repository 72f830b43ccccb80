//! In-memory record store: the source of truth for a review session.

use std::collections::HashMap;

use crate::error::LeadError;
use crate::record::types::{validate_confidence, validate_field_keys};
use crate::record::{Record, RecordDraft};
use crate::source::RecordSource;
use crate::workflow::{StageTransition, WorkflowVariant};

/// Counts reported by [`RecordStore::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub updated: usize,
}

/// Records in insertion order with an id index. Records are never removed.
///
/// Every record's stage belongs to the store's workflow variant and ids never
/// change once stored.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    index: HashMap<String, usize>,
    variant: WorkflowVariant,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(variant: WorkflowVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.variant
    }

    /// Replaces the store's contents with everything `source` yields.
    ///
    /// Fails without touching the current contents when the source is
    /// unreachable, malformed, or contains duplicate ids.
    pub fn load(
        &mut self,
        source: &dyn RecordSource,
        variant: WorkflowVariant,
    ) -> Result<usize, LeadError> {
        let origin = source.describe();
        let records = normalize(&origin, source.load()?, variant)?;

        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(LeadError::load(
                    origin,
                    format!("duplicate record id {}", record.id),
                ));
            }
        }

        self.records = records;
        self.index = index;
        self.variant = variant;
        tracing::info!(origin = %origin, count = self.records.len(), "records loaded");
        Ok(self.records.len())
    }

    /// Upserts records from another source. Known ids are replaced in place,
    /// new ids are appended; later duplicates within `source` win.
    ///
    /// An empty store adopts `variant`; a populated one only merges under the
    /// variant its records were loaded with.
    pub fn merge(
        &mut self,
        source: &dyn RecordSource,
        variant: WorkflowVariant,
    ) -> Result<MergeReport, LeadError> {
        let origin = source.describe();
        if !self.is_empty() && variant != self.variant {
            return Err(LeadError::load(
                origin,
                format!(
                    "cannot merge {variant} workflow records into a {} working set",
                    self.variant
                ),
            ));
        }
        let incoming = normalize(&origin, source.load()?, variant)?;
        self.variant = variant;
        let report = self.merge_records(incoming);
        tracing::info!(
            origin = %origin,
            added = report.added,
            updated = report.updated,
            "records merged"
        );
        Ok(report)
    }

    fn merge_records(&mut self, incoming: Vec<Record>) -> MergeReport {
        let mut report = MergeReport::default();
        for record in incoming {
            match self.index.get(&record.id) {
                Some(&pos) => {
                    self.records[pos] = record;
                    report.updated += 1;
                }
                None => {
                    self.index.insert(record.id.clone(), self.records.len());
                    self.records.push(record);
                    report.added += 1;
                }
            }
        }
        report
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Result<&Record, LeadError> {
        self.index
            .get(id)
            .map(|&pos| &self.records[pos])
            .ok_or_else(|| LeadError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies `mutator` to the record. The edit is discarded when it breaks
    /// a record invariant, see [`try_update`](Self::try_update).
    pub fn update<F>(&mut self, id: &str, mutator: F) -> Result<(), LeadError>
    where
        F: FnOnce(&mut Record),
    {
        self.try_update(id, |record| {
            mutator(record);
            Ok(())
        })
    }

    /// Fallible edit: the mutator works on a copy that is committed only when
    /// it returns `Ok` and the copy still keeps its id, a stage of the active
    /// variant, a valid confidence and single-line field keys.
    pub fn try_update<F, T>(&mut self, id: &str, mutator: F) -> Result<T, LeadError>
    where
        F: FnOnce(&mut Record) -> Result<T, LeadError>,
    {
        let pos = self.position(id)?;
        let mut draft = self.records[pos].clone();
        let out = mutator(&mut draft)?;
        self.check_edit(&self.records[pos], &draft)?;
        self.records[pos] = draft;
        Ok(out)
    }

    fn check_edit(&self, current: &Record, edited: &Record) -> Result<(), LeadError> {
        if edited.id != current.id {
            return Err(LeadError::Validation(format!(
                "record id is immutable ({} -> {})",
                current.id, edited.id
            )));
        }
        StageTransition::ensure_member(self.variant, edited.stage).map_err(|cause| {
            LeadError::InvalidTransition {
                id: current.id.clone(),
                cause,
            }
        })?;
        validate_confidence(edited.confidence)
            .and_then(|_| validate_field_keys(&edited.fields))
            .map_err(|e| LeadError::Validation(format!("record {}: {e}", current.id)))?;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, LeadError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LeadError::NotFound(id.to_string()))
    }
}

fn normalize(
    origin: &str,
    drafts: Vec<RecordDraft>,
    variant: WorkflowVariant,
) -> Result<Vec<Record>, LeadError> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(idx, draft)| {
            draft
                .into_record(variant)
                .map_err(|reason| LeadError::load(origin, format!("entry {idx}: {reason}")))
        })
        .collect()
}
