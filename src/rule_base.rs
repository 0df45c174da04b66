use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::action_set::RuleActionSet;
use crate::error::RuleError;
use crate::rule::{DefaultActionScope, Rule};

/// A rule paired with its effective, merged action set.
#[derive(Debug, Clone)]
pub struct LoadedRule {
    rule: Rule,
    actions: Arc<RuleActionSet>,
}

impl LoadedRule {
    pub fn id(&self) -> &str {
        &self.rule.id
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The frozen action set the evaluation engine consults.
    pub fn actions(&self) -> &RuleActionSet {
        &self.actions
    }

    /// Shared handle to the action set, for evaluation tasks that
    /// outlive a borrow of the rule base.
    pub fn actions_handle(&self) -> Arc<RuleActionSet> {
        Arc::clone(&self.actions)
    }
}

/// A fully loaded, immutable rule base.
///
/// Construction happens single-threaded at configuration load; scopes
/// are resolved in declaration order, so a scope's parent always has an
/// effective set before the scope itself is merged.
#[derive(Debug, Default)]
pub struct RuleBase {
    rules: Vec<LoadedRule>,
    index: HashMap<String, usize>,
}

impl RuleBase {
    /// Builds a rule base from default-action scopes and rules, both in
    /// declaration order.
    pub fn load(scopes: &[DefaultActionScope], rules: &[Rule]) -> Result<RuleBase, RuleError> {
        let mut effective_scopes: HashMap<String, Arc<RuleActionSet>> = HashMap::new();
        for scope in scopes {
            if effective_scopes.contains_key(&scope.name) {
                return Err(RuleError::DuplicateScope {
                    name: scope.name.clone(),
                });
            }
            let parent = match &scope.inherits {
                Some(name) => Some(effective_scopes.get(name).cloned().ok_or_else(|| {
                    RuleError::UnknownScope { name: name.clone() }
                })?),
                None => None,
            };
            let merged = RuleActionSet::merged(&scope.actions, parent.as_deref());
            effective_scopes.insert(scope.name.clone(), Arc::new(merged));
        }

        let mut loaded = Vec::with_capacity(rules.len());
        let mut index = HashMap::with_capacity(rules.len());
        for rule in rules {
            if index.contains_key(&rule.id) {
                return Err(RuleError::DuplicateRule {
                    id: rule.id.clone(),
                });
            }
            let parent = match &rule.scope {
                Some(name) => Some(effective_scopes.get(name).ok_or_else(|| {
                    RuleError::UnknownScope { name: name.clone() }
                })?),
                None => None,
            };
            let actions = RuleActionSet::merged(&rule.actions, parent.map(Arc::as_ref));
            debug!(rule_id = %rule.id, scope = rule.scope.as_deref(), "merged rule actions");

            index.insert(rule.id.clone(), loaded.len());
            loaded.push(LoadedRule {
                rule: rule.clone(),
                actions: Arc::new(actions),
            });
        }

        Ok(RuleBase {
            rules: loaded,
            index,
        })
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[LoadedRule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&LoadedRule> {
        self.index.get(id).map(|&position| &self.rules[position])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Shared handle to the active rule base.
///
/// A reload never mutates the live base: the replacement is built off to
/// the side and swapped in atomically, so evaluations holding the old
/// snapshot keep a fully consistent view until they drop it.
#[derive(Clone, Default)]
pub struct SharedRuleBase {
    inner: Arc<RwLock<Arc<RuleBase>>>,
}

impl SharedRuleBase {
    pub fn new(base: RuleBase) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(base))),
        }
    }

    /// The current rule base. The returned handle stays valid and
    /// unchanged across reloads.
    pub fn current(&self) -> Arc<RuleBase> {
        self.inner.read().clone()
    }

    /// Atomically replaces the active rule base.
    pub fn reload(&self, base: RuleBase) {
        let base = Arc::new(base);
        info!(rules = base.len(), "rule base reloaded");
        *self.inner.write() = base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, DisruptiveAction};
    use crate::flags::FlagKind;
    use crate::transformation::Transform;

    fn base_scope() -> DefaultActionScope {
        DefaultActionScope::new(
            "request",
            vec![
                Action::flag(FlagKind::Log, true),
                Action::Disruptive {
                    action: DisruptiveAction::Pass,
                },
            ],
        )
    }

    #[test]
    fn rules_inherit_from_their_named_scope() {
        let rules = vec![
            Rule::new("920100", vec![]).in_scope("request"),
            Rule::new("920200", vec![Action::flag(FlagKind::Log, false)]).in_scope("request"),
            Rule::new("standalone", vec![]),
        ];

        let base = RuleBase::load(&[base_scope()], &rules).expect("load");

        assert!(base.get("920100").unwrap().actions().contains_log());
        assert!(!base.get("920200").unwrap().actions().contains_log());
        assert!(!base.get("standalone").unwrap().actions().contains_log());
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn scope_chains_merge_in_declaration_order() {
        let scopes = vec![
            base_scope(),
            DefaultActionScope::new(
                "request-strict",
                vec![
                    Action::Disruptive {
                        action: DisruptiveAction::Deny,
                    },
                    Action::transform("lowercase"),
                ],
            )
            .inheriting("request"),
        ];
        let rules = vec![Rule::new("931100", vec![]).in_scope("request-strict")];

        let base = RuleBase::load(&scopes, &rules).expect("load");
        let actions = base.get("931100").unwrap().actions();

        assert!(actions.contains_log(), "inherited across the chain");
        assert_eq!(actions.disruptive(), Some(&DisruptiveAction::Deny));
        assert_eq!(
            actions
                .transforms()
                .iter()
                .map(Transform::as_str)
                .collect::<Vec<_>>(),
            vec!["lowercase"]
        );
    }

    #[test]
    fn duplicate_rule_ids_are_rejected() {
        let rules = vec![Rule::new("1", vec![]), Rule::new("1", vec![])];
        let err = RuleBase::load(&[], &rules).unwrap_err();
        assert!(matches!(err, RuleError::DuplicateRule { id } if id == "1"));
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let rules = vec![Rule::new("1", vec![]).in_scope("missing")];
        let err = RuleBase::load(&[], &rules).unwrap_err();
        assert!(matches!(err, RuleError::UnknownScope { name } if name == "missing"));
    }

    #[test]
    fn scope_must_be_declared_before_use() {
        let scopes = vec![
            DefaultActionScope::new("child", vec![]).inheriting("parent"),
            DefaultActionScope::new("parent", vec![]),
        ];
        let err = RuleBase::load(&scopes, &[]).unwrap_err();
        assert!(matches!(err, RuleError::UnknownScope { name } if name == "parent"));
    }

    #[test]
    fn reload_leaves_held_snapshots_untouched() {
        let rules = vec![Rule::new("old", vec![])];
        let shared = SharedRuleBase::new(RuleBase::load(&[], &rules).expect("load"));

        let in_flight = shared.current();
        shared.reload(RuleBase::load(&[], &[Rule::new("new", vec![])]).expect("load"));

        assert!(in_flight.get("old").is_some(), "old view stays consistent");
        assert!(in_flight.get("new").is_none());
        assert!(shared.current().get("new").is_some());
    }
}
