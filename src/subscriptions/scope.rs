//! Scope Change Events
//!
//! A scope is a caller-chosen grouping tag, usually the active UI view. When
//! the view changes, everything opened under the old one is released.

use serde::{Deserialize, Serialize};

/// Signal that the active scope moved from `previous_scope` to `new_scope`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChange {
    #[serde(default)]
    pub previous_scope: Option<String>,
    #[serde(default)]
    pub new_scope: Option<String>,
}

impl ScopeChange {
    pub fn new(previous_scope: Option<&str>, new_scope: Option<&str>) -> Self {
        Self {
            previous_scope: previous_scope.map(String::from),
            new_scope: new_scope.map(String::from),
        }
    }

    /// The scope whose subscriptions must be released, if any.
    pub fn released_scope(&self) -> Option<&str> {
        match (&self.previous_scope, &self.new_scope) {
            (Some(previous), Some(new)) if previous == new => None,
            (Some(previous), _) => Some(previous.as_str()),
            (None, _) => None,
        }
    }
}
