//! Wire types for the server's email-map admin endpoint.
//!
//! Both `GET` and `POST` answer with the same envelope:
//!
//! ```json
//! { "data": { "mappings": [ { "from": "messageSubject", "to": "rma:title" } ] } }
//! ```
//!
//! Responses in any other shape are treated as transport failures by the
//! caller, never silently coerced.

use serde::{Deserialize, Serialize};

use crate::mapping::Mapping;

/// Response envelope carrying the authoritative mapping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingList {
    pub data: MappingData,
}

/// Inner `data` object of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingData {
    pub mappings: Vec<Mapping>,
}

impl MappingList {
    /// Unwrap the envelope into the mapping list.
    #[must_use]
    pub fn into_mappings(self) -> Vec<Mapping> {
        self.data.mappings
    }
}

/// Batched change submission posted to the endpoint.
///
/// A side with nothing staged is omitted from the JSON body entirely rather
/// than sent as an empty array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<Mapping>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Vec<Mapping>>,
}

impl ChangeSet {
    /// Build a change set, dropping empty sides.
    #[must_use]
    pub fn new(adds: Vec<Mapping>, deletes: Vec<Mapping>) -> Self {
        Self {
            add: if adds.is_empty() { None } else { Some(adds) },
            delete: if deletes.is_empty() {
                None
            } else {
                Some(deletes)
            },
        }
    }

    /// True when there is nothing to submit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.delete.is_none()
    }
}
