//! Transition rules for a stage chain

use super::stage::{Stage, WorkflowVariant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: Stage, to: Stage },
    #[error("cannot advance from terminal stage {state}")]
    FromTerminalState { state: Stage },
    #[error("stage {stage} is not part of the {variant}-stage workflow")]
    NotInWorkflow {
        stage: Stage,
        variant: WorkflowVariant,
    },
}

pub struct StageTransition;

impl StageTransition {
    /// Forward-by-one is the only legal transition in the chain.
    pub fn validate(variant: WorkflowVariant, from: Stage, to: Stage) -> Result<(), TransitionError> {
        Self::ensure_member(variant, from)?;
        Self::ensure_member(variant, to)?;

        if Self::is_terminal(variant, from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        if Self::next_stage(variant, from) == Some(to) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    pub fn ensure_member(variant: WorkflowVariant, stage: Stage) -> Result<(), TransitionError> {
        if variant.stages().contains(&stage) {
            Ok(())
        } else {
            Err(TransitionError::NotInWorkflow { stage, variant })
        }
    }

    pub fn position(variant: WorkflowVariant, stage: Stage) -> Option<usize> {
        variant.stages().iter().position(|s| *s == stage)
    }

    pub fn next_stage(variant: WorkflowVariant, current: Stage) -> Option<Stage> {
        let idx = Self::position(variant, current)?;
        variant.stages().get(idx + 1).copied()
    }

    pub fn is_terminal(variant: WorkflowVariant, stage: Stage) -> bool {
        variant.stages().last() == Some(&stage)
    }

    pub fn stage_description(stage: Stage) -> &'static str {
        match stage {
            Stage::Surveying => "Load potential prospects from various sources",
            Stage::Prospecting => "Review prospects and analyze their potential",
            Stage::Mining => "Augment prospects with valuable information",
            Stage::Collecting => "Finalize and organize prospects to contact",
        }
    }
}
