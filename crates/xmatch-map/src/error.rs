//! Error types for scoring and matching.

use thiserror::Error;
use xmatch_model::ModelError;

/// Failure of one similarity computation for one candidate.
///
/// The search loop turns any of these into a zero contribution for that
/// candidate; they never abort a search.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    #[error("similarity is not a finite number: {value}")]
    NonFinite { value: f64 },

    #[error("similarity {value} is outside [0, 1] and [0, 100]")]
    OutOfRange { value: f64 },

    #[error("scorer '{method}' is not available in this build")]
    Unavailable { method: &'static str },

    #[error("{0}")]
    Custom(String),
}

/// Errors that prevent a matching pass from starting.
#[derive(Debug, Error)]
pub enum MatchError {
    // === Input Errors ===
    #[error("invalid column selection for {side}: {source}")]
    Selection {
        side: &'static str,
        #[source]
        source: ModelError,
    },

    #[error("{side} has no rows")]
    EmptySource { side: &'static str },

    // === Method Errors ===
    #[error("no matching methods selected")]
    NoMethods,

    #[error("unknown matching method '{0}'")]
    UnknownMethod(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
