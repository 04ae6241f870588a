//! Change-plan files for batched apply.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use emap_model::Mapping;

/// A batch of changes read from a JSON file:
///
/// ```json
/// {
///   "add": [ { "from": "messageCc", "to": "rma:participants" } ],
///   "remove": [ { "from": "messageSubject", "to": "rma:title" } ]
/// }
/// ```
///
/// Either key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePlan {
    /// Pairs to stage as additions.
    #[serde(default)]
    pub add: Vec<Mapping>,
    /// Pairs to stage as removals.
    #[serde(default)]
    pub remove: Vec<Mapping>,
}

impl ChangePlan {
    /// True when the plan contains no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// Read a plan from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
        let plan: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse plan file: {}", path.display()))?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_plan() {
        let json = r#"{
            "add": [{"from": "messageCc", "to": "rma:participants"}],
            "remove": [{"from": "messageSubject", "to": "rma:title"}]
        }"#;
        let plan: ChangePlan = serde_json::from_str(json).expect("parse plan");
        assert_eq!(plan.add, vec![Mapping::new("messageCc", "rma:participants")]);
        assert_eq!(
            plan.remove,
            vec![Mapping::new("messageSubject", "rma:title")]
        );
        assert!(!plan.is_empty());
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let plan: ChangePlan = serde_json::from_str("{}").expect("parse plan");
        assert!(plan.is_empty());

        let plan: ChangePlan =
            serde_json::from_str(r#"{"add": [{"from": "a", "to": "b"}]}"#).expect("parse plan");
        assert_eq!(plan.add.len(), 1);
        assert!(plan.remove.is_empty());
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(serde_json::from_str::<ChangePlan>(r#"{"add": [{"from": "a"}]}"#).is_err());
        assert!(serde_json::from_str::<ChangePlan>(r#"{"add": "a=b"}"#).is_err());
    }
}
