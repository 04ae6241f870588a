//! The mapping pair and its command-line text form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PairParseError;

/// A single email-header to record-property mapping.
///
/// A mapping is identified by the whole `(from, to)` pair. Neither side is
/// unique on its own: one header may feed several record properties, and one
/// property may be fed by several headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mapping {
    /// Email header name, e.g. `messageSubject`.
    pub from: String,
    /// Record property the header value is written to, e.g. `rma:title`.
    pub to: String,
}

impl Mapping {
    /// Create a mapping pair.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Both sides are present. Incomplete pairs are never valid additions.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }

    /// Parse a pair written as `header=property`.
    ///
    /// Exactly one `=` is required and both sides must be non-empty; header
    /// and property names never contain `=` themselves.
    pub fn parse(input: &str) -> Result<Self, PairParseError> {
        let Some((from, to)) = input.split_once('=') else {
            return Err(PairParseError::MissingSeparator(input.to_string()));
        };
        if to.contains('=') {
            return Err(PairParseError::ExtraSeparator(input.to_string()));
        }
        if from.is_empty() || to.is_empty() {
            return Err(PairParseError::EmptySide(input.to_string()));
        }
        Ok(Self::new(from, to))
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
