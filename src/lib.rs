//! Rule-action aggregation and inheritance-merge engine for a
//! traffic-inspection firewall's rule model.
//!
//! Every rule carries a set of declared actions: reject the request,
//! log it, transform the candidate value before comparison, tag the
//! match, record variables. Rules may inherit a baseline from an
//! enclosing default-action scope and selectively override parts of it.
//! This crate computes the effective merged set for each rule at load
//! time and freezes it, so the matching engine can read it from many
//! concurrent evaluations without synchronization.
//!
//! Merge semantics differ per category: flags and the disruptive slot
//! overwrite (last declaration wins), tag/set-var/runtime sequences
//! accumulate in declaration order, and the transformation pipeline
//! accumulates but can be cleared by an explicit reset marker. Pattern
//! matching, transformation execution and rule-text parsing live in
//! collaborating components; this crate only classifies, merges and
//! exposes action metadata.

mod action;
mod action_set;
mod error;
mod flags;
mod rule;
mod rule_base;
mod transformation;

pub use action::{Action, DisruptiveAction, RuntimeAction, SetVar, SetVarOp, Tag};
pub use action_set::{ActionSetBuilder, RuleActionSet};
pub use error::RuleError;
pub use flags::{ActionFlags, FlagKind};
pub use rule::{DefaultActionScope, Rule};
pub use rule_base::{LoadedRule, RuleBase, SharedRuleBase};
pub use transformation::{Transform, TransformPipeline};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_a_rule_against_its_default_scope() {
        let scopes = vec![DefaultActionScope::new(
            "inbound",
            vec![Action::flag(FlagKind::Log, true), Action::transform("lowercase")],
        )];
        let rules = vec![Rule::new(
            "941100",
            vec![
                Action::Disruptive {
                    action: DisruptiveAction::Deny,
                },
                Action::TransformNone,
                Action::transform("url_decode"),
                Action::tag("attack-xss"),
            ],
        )
        .in_scope("inbound")];

        let base = RuleBase::load(&scopes, &rules).expect("rule base loads");
        let actions = base.get("941100").expect("rule present").actions();

        assert!(actions.contains_log());
        assert_eq!(actions.disruptive(), Some(&DisruptiveAction::Deny));
        assert_eq!(
            actions
                .transforms()
                .iter()
                .map(Transform::as_str)
                .collect::<Vec<_>>(),
            vec!["url_decode"]
        );
        assert_eq!(actions.tags().len(), 1);
        assert_eq!(actions.tags()[0].as_str(), "attack-xss");
    }
}
