use thiserror::Error;

use crate::workflow::TransitionError;

/// Stable error categories, used for user-facing messages and process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorKind {
    Load = 20,
    Save = 21,
    NotFound = 30,
    InvalidTransition = 31,
    Validation = 32,
    Export = 40,
}

impl ErrorKind {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Load => "load error",
            Self::Save => "save error",
            Self::NotFound => "not found",
            Self::InvalidTransition => "invalid transition",
            Self::Validation => "validation error",
            Self::Export => "export error",
        }
    }
}

/// Failures of a single lead-review action. None of them poison the session:
/// the store is left as it was before the failing call.
#[derive(Error, Debug)]
pub enum LeadError {
    #[error("load error: {origin}: {reason}")]
    Load { origin: String, reason: String },

    #[error("save error: {target}: {reason}")]
    Save { target: String, reason: String },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("invalid transition for record {id}: {cause}")]
    InvalidTransition {
        id: String,
        #[source]
        cause: TransitionError,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("export error: {0}")]
    Export(String),
}

impl LeadError {
    pub fn load(origin: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    pub fn save(target: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Save {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load { .. } => ErrorKind::Load,
            Self::Save { .. } => ErrorKind::Save,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Export(_) => ErrorKind::Export,
        }
    }
}
