//! Engine error types.
//!
//! The scheduling and classification functions never fail; these errors cover
//! the surfaces around them where a caller hands in something unusable
//! (an unknown criterion index, a rotation with no duration, a bad date).

use thiserror::Error;

/// Errors raised by the fallible entry points of the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A session operation referenced a criterion index that does not exist.
    #[error("unknown criterion index {index} (session holds {len} criteria)")]
    UnknownCriterion { index: usize, len: usize },

    /// The rotation configuration violates the caller contract.
    #[error("invalid rotation: {0}")]
    InvalidRotation(String),

    /// A calendar date could not be parsed.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}
