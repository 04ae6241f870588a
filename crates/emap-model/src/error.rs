//! Error types for mapping pair parsing.

use thiserror::Error;

/// Errors from parsing a `header=property` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairParseError {
    /// Input contained no `=` separator.
    #[error("expected a pair written as header=property, got: {0}")]
    MissingSeparator(String),
    /// Input contained more than one `=` separator.
    #[error("pair contains more than one '=': {0}")]
    ExtraSeparator(String),
    /// One side of the pair was empty.
    #[error("pair has an empty side: {0}")]
    EmptySide(String),
}
