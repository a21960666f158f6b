use thiserror::Error;

/// Errors surfaced by the engine. None of them are fatal: each one is
/// reported to the immediate caller, which decides how to recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NimError {
    #[error("invalid move ({row}, {count}): {reason}")]
    InvalidMove { row: usize, count: u32, reason: String },

    #[error("malformed move '{input}': expected \"(row, count)\"")]
    MalformedMove { input: String },

    #[error("no legal move: the position is terminal")]
    NoLegalMove,

    #[error("invalid pile configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("no option {index}: only {available} candidates on offer")]
    InvalidSelection { index: usize, available: usize },

    #[error("selection abandoned before a move was chosen")]
    SelectionAbandoned,

    #[error("advisor unavailable: {reason}")]
    AdvisorUnavailable { reason: String },
}

impl NimError {
    pub(crate) fn invalid_move(row: usize, count: u32, reason: impl Into<String>) -> Self {
        NimError::InvalidMove { row, count, reason: reason.into() }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        NimError::InvalidConfiguration { reason: reason.into() }
    }

    pub(crate) fn advisor(reason: impl Into<String>) -> Self {
        NimError::AdvisorUnavailable { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, NimError>;
