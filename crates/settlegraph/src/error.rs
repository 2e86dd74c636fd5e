//! Error taxonomy shared by the generators, the matcher and the racing search.
//!
//! None of these are retryable: every algorithm in this crate is deterministic
//! for a given input, so a repeated call reproduces the same failure.

use thiserror::Error;

use crate::search::SearchSide;

/// Errors surfaced by the simplification pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimplifyError {
    /// Unbalanced ledger, zero where a sign is required, or generator bounds
    /// outside `1 <= k <= n`. Always raised before any search starts.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    /// Both searches exhausted without a matching. The all-singleton fallback
    /// makes this unreachable unless generator termination is broken.
    #[error("internal invariant violated: {reason}")]
    InternalInvariantViolation { reason: String },
    /// A search thread panicked or could not be spawned before producing its result.
    #[error("{search} search thread terminated abnormally")]
    ThreadFailure { search: SearchSide },
}

impl SimplifyError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InternalInvariantViolation {
            reason: reason.into(),
        }
    }
}
