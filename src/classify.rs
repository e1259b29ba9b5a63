//! Sub-account classification by keyword triggers
//!
//! Which sub-account a transaction belongs to is configuration, not code:
//! each tag carries a list of case-insensitive substring triggers, and a
//! transaction receives every tag with at least one trigger present in its
//! free text. New sub-accounts are a configuration change only.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{ReconcileError, ReconcileResult};

/// Declarative tag configuration: tag name to one-or-more substring triggers.
///
/// Triggers are stored lowercased; matching is case-insensitive substring
/// search, evaluated independently per tag. Tag names double as snapshot
/// column names during reconciliation, so they are typically display names
/// like `"Latino Initiative"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagRules {
    rules: BTreeMap<String, Vec<String>>,
}

impl TagRules {
    /// Create an empty rule set (nothing gets tagged)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag with its trigger substrings
    pub fn with_tag<I, S>(mut self, name: &str, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules.insert(
            name.to_string(),
            triggers
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        );
        self
    }

    /// Tags whose trigger is a substring of `text`, zero or more of them
    pub fn classify(&self, text: &str) -> BTreeSet<String> {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| haystack.contains(t.as_str())))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Configured tag names, in sorted order
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reject blank tag names, empty trigger lists, and blank triggers
    pub fn validate(&self) -> ReconcileResult<()> {
        for (name, triggers) in &self.rules {
            if name.trim().is_empty() {
                return Err(ReconcileError::Config(
                    "tag name cannot be empty".to_string(),
                ));
            }
            if triggers.is_empty() {
                return Err(ReconcileError::Config(format!(
                    "tag '{}' has no triggers",
                    name
                )));
            }
            if triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(ReconcileError::Config(format!(
                    "tag '{}' has a blank trigger",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl<S: AsRef<str>> FromIterator<(S, Vec<S>)> for TagRules {
    fn from_iter<I: IntoIterator<Item = (S, Vec<S>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |rules, (name, triggers)| {
                rules.with_tag(name.as_ref(), triggers)
            })
    }
}
