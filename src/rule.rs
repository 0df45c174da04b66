use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Declarative rule definition as produced by the rule parser.
///
/// Actions are kept in declaration order; the merge engine depends on
/// that order and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    /// Unique identifier for the rule. Used for reporting and lookups.
    pub id: String,
    /// Optional human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the enclosing default-action scope, if any.
    #[serde(default)]
    pub scope: Option<String>,
    /// Actions declared on the rule itself, in declaration order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    pub fn new(id: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            id: id.into(),
            description: None,
            scope: None,
            actions,
        }
    }

    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Default-action scope: a configuration construct providing the
/// baseline action set inherited by the rules declared under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultActionScope {
    pub name: String,
    /// Enclosing scope this one refines. Must be declared earlier in
    /// the configuration; the load order is the ancestor order.
    #[serde(default)]
    pub inherits: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl DefaultActionScope {
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            inherits: None,
            actions,
        }
    }

    pub fn inheriting(mut self, parent: impl Into<String>) -> Self {
        self.inherits = Some(parent.into());
        self
    }
}
