use serde::{Deserialize, Serialize};

use crate::flags::FlagKind;
use crate::transformation::Transform;

/// A single action declared on a rule or a default-action scope.
///
/// Classification happens upstream in the rule parser; by the time an
/// action reaches this crate it is already validated and tagged with its
/// capability. The merge engine never executes an action, it only files
/// the payload under the right category of the effective set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Replace the active disruptive action.
    Disruptive { action: DisruptiveAction },
    /// Append a named transformation to the pipeline.
    Transform { transform: Transform },
    /// Discard every transformation accumulated so far, inherited or local.
    TransformNone,
    /// Set one of the boolean evaluation flags.
    Flag { kind: FlagKind, value: bool },
    /// Attach a classification tag to match events.
    Tag { tag: Tag },
    /// Record or mutate an evaluation-state variable on match.
    SetVar { var: SetVar },
    /// Any other match-time action, executed in declaration order.
    Runtime { action: RuntimeAction },
}

impl Action {
    /// Shorthand for a named transformation declaration.
    pub fn transform(name: impl Into<Transform>) -> Self {
        Action::Transform {
            transform: name.into(),
        }
    }

    /// Shorthand for a flag declaration.
    pub fn flag(kind: FlagKind, value: bool) -> Self {
        Action::Flag { kind, value }
    }

    /// Shorthand for a tag declaration.
    pub fn tag(label: impl Into<Tag>) -> Self {
        Action::Tag { tag: label.into() }
    }
}

/// Request-flow altering effect applied once a rule matches.
///
/// At most one disruptive action is active per rule; redeclaring one
/// overwrites the previous wholesale. The concrete behaviour (status
/// codes, connection teardown) belongs to the evaluation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisruptiveAction {
    /// Stop rule processing and reject the transaction.
    Deny,
    /// Close the connection without a response.
    Drop,
    /// Send the client to the given location.
    Redirect { location: String },
    /// Stop evaluating the current rule and move to the next one.
    Pass,
    /// Stop rule processing and let the transaction through.
    Allow,
    /// Defer to the engine-wide blocking behaviour.
    Block,
}

/// Label attached to a match event for classification and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::new(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::new(value)
    }
}

/// Variable directive recorded in evaluation state when a rule matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetVar {
    /// Collection-qualified variable name, e.g. `ip.failed_logins`.
    pub key: String,
    pub op: SetVarOp,
    /// Right-hand side; absent for [`SetVarOp::Unset`].
    #[serde(default)]
    pub value: Option<String>,
}

impl SetVar {
    pub fn assign(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: SetVarOp::Assign,
            value: Some(value.into()),
        }
    }

    pub fn unset(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: SetVarOp::Unset,
            value: None,
        }
    }
}

/// Operator of a set-var directive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SetVarOp {
    Assign,
    Increment,
    Decrement,
    Unset,
}

/// Escape hatch for match-time actions outside the fixed categories.
///
/// Accumulated like tags and set-vars; the evaluation engine executes
/// them in declaration order after a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeAction {
    pub name: String,
    #[serde(default)]
    pub argument: Option<String>,
}

impl RuntimeAction {
    pub fn new(name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            name: name.into(),
            argument,
        }
    }
}
