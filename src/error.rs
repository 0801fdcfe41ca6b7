//! Error types for TallyChain

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A queue request omitted a required transaction field. Surfaced
    /// directly to the caller; never retried internally.
    #[error("Missing transaction field: {0}")]
    MissingField(&'static str),

    /// The submitted proof failed the difficulty predicate. An ordinary
    /// outcome, not a fault: the caller may resubmit with another proof.
    #[error("Proof does not meet the difficulty target")]
    InvalidProof,

    /// Canonical serialization of a block failed. Unreachable for the fixed
    /// block schema.
    #[error("Canonical serialization failed: {0}")]
    Canonical(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Canonical(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
