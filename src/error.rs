//! Error taxonomy for grade parsing and aggregation.
//!
//! Neither error is fatal: a [`ParseFailure`] only excludes one token from the
//! statistics, and [`GradeError::EmptyDataset`] tags the zero overall mean of a
//! report in which nothing parsed.

use thiserror::Error;

/// Why a single grade token could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// The token was absent or blank.
    #[error("empty grade token")]
    Empty,

    /// The token (or what remained after stripping a modifier) is not a number.
    #[error("not a numeric grade: {0:?}")]
    NotNumeric(String),

    /// An `a/b` token whose halves are not both plain digit strings.
    #[error("malformed fraction grade: {0:?}")]
    MalformedFraction(String),
}

/// Report-level conditions a caller has to tell apart from real statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// No record produced a numeric grade, so the overall mean is a placeholder.
    #[error("no record produced a valid grade")]
    EmptyDataset,
}
