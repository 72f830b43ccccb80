//! # Workflow stages
//!
//! Leads move through a fixed linear chain of stages. Two variants exist:
//! the three-stage chain (prospecting, mining, collecting) and the four-stage
//! chain that starts with surveying.
//!
//! - `stage`: the stage enum and the variant that selects a chain
//! - `transitions`: transition rules over a chain
//! - `manager`: applies transitions to records held in a [`RecordStore`](crate::store::RecordStore)

pub mod manager;
pub mod stage;
pub mod transitions;

pub use manager::{AdvanceOutcome, WorkflowManager};
pub use stage::{Stage, WorkflowVariant};
pub use transitions::{StageTransition, TransitionError};
