//! Error types for the diff crate.

use crate::session::Phase;

/// Errors that can occur during a diff run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// An old-catalog record was offered after the new catalog had started.
    #[error("cannot observe {attempted} catalog records during the {phase} phase")]
    PhaseOrder { attempted: Phase, phase: Phase },

    /// Report configuration could not be parsed.
    #[error("invalid report configuration: {0}")]
    Config(String),

    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
