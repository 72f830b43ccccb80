use crate::error::LeadError;
use crate::store::RecordStore;

use super::stage::{Stage, WorkflowVariant};
use super::transitions::{StageTransition, TransitionError};

/// Result of advancing one record in a bulk advance.
#[derive(Debug)]
pub struct AdvanceOutcome {
    pub id: String,
    pub result: Result<Stage, LeadError>,
}

/// Moves records along the stage chain of one workflow variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowManager {
    variant: WorkflowVariant,
}

impl WorkflowManager {
    pub fn new(variant: WorkflowVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.variant
    }

    pub fn stages(&self) -> &'static [Stage] {
        self.variant.stages()
    }

    pub fn initial(&self) -> Stage {
        self.stages()[0]
    }

    pub fn terminal(&self) -> Stage {
        self.stages()[self.stages().len() - 1]
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.stages().contains(&stage)
    }

    pub fn next(&self, stage: Stage) -> Option<Stage> {
        StageTransition::next_stage(self.variant, stage)
    }

    pub fn is_terminal(&self, stage: Stage) -> bool {
        StageTransition::is_terminal(self.variant, stage)
    }

    /// Moves the record one stage forward and returns its new stage.
    pub fn advance(&self, store: &mut RecordStore, id: &str) -> Result<Stage, LeadError> {
        let variant = self.variant;
        let result = store.try_update(id, |record| {
            let from = record.stage;
            let to = StageTransition::next_stage(variant, from).ok_or_else(|| {
                let cause = if StageTransition::is_terminal(variant, from) {
                    TransitionError::FromTerminalState { state: from }
                } else {
                    TransitionError::NotInWorkflow {
                        stage: from,
                        variant,
                    }
                };
                LeadError::InvalidTransition {
                    id: record.id.clone(),
                    cause,
                }
            })?;
            StageTransition::validate(variant, from, to).map_err(|cause| {
                LeadError::InvalidTransition {
                    id: record.id.clone(),
                    cause,
                }
            })?;
            record.stage = to;
            Ok((from, to))
        });

        match result {
            Ok((from, to)) => {
                tracing::info!(record = %id, %from, %to, "record advanced");
                Ok(to)
            }
            Err(e) => {
                tracing::warn!(record = %id, error = %e, "advance rejected");
                Err(e)
            }
        }
    }

    /// Advances every id independently; one failure does not stop the rest.
    pub fn advance_all<S: AsRef<str>>(
        &self,
        store: &mut RecordStore,
        ids: &[S],
    ) -> Vec<AdvanceOutcome> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                AdvanceOutcome {
                    id: id.to_string(),
                    result: self.advance(store, id),
                }
            })
            .collect()
    }

    /// Direct assignment for corrections. Any stage of the active chain is
    /// accepted, backwards included. Returns the previous stage.
    pub fn set_stage(
        &self,
        store: &mut RecordStore,
        id: &str,
        stage: Stage,
    ) -> Result<Stage, LeadError> {
        let variant = self.variant;
        let previous = store.try_update(id, |record| {
            StageTransition::ensure_member(variant, stage).map_err(|cause| {
                LeadError::InvalidTransition {
                    id: record.id.clone(),
                    cause,
                }
            })?;
            let previous = record.stage;
            record.stage = stage;
            Ok(previous)
        })?;
        tracing::info!(record = %id, from = %previous, to = %stage, "record stage set");
        Ok(previous)
    }
}
