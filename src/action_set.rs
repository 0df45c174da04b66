use std::sync::Arc;

use tracing::debug;

use crate::action::{Action, DisruptiveAction, RuntimeAction, SetVar, Tag};
use crate::flags::{ActionFlags, FlagKind};
use crate::transformation::{Transform, TransformPipeline};

/// The effective, frozen action set the matching engine consults.
///
/// Built once per rule at load time by an [`ActionSetBuilder`]; after
/// [`ActionSetBuilder::freeze`] nothing can mutate it, so many concurrent
/// request evaluations read it without synchronization. Cloning copies
/// the containers but shares the contained payloads, so a clone is cheap
/// and appending to a clone (through a new builder) never touches the
/// original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleActionSet {
    flags: ActionFlags,
    disruptive: Option<Arc<DisruptiveAction>>,
    transforms: TransformPipeline,
    tags: Vec<Arc<Tag>>,
    set_vars: Vec<Arc<SetVar>>,
    runtime_actions: Vec<Arc<RuntimeAction>>,
}

impl RuleActionSet {
    /// The all-default set: every flag false, every sequence empty, no
    /// disruptive action.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One-shot merge of a rule's declared actions against inherited
    /// defaults.
    pub fn merged(own: &[Action], parent: Option<&RuleActionSet>) -> Self {
        let mut builder = ActionSetBuilder::new();
        builder.populate(own, parent);
        builder.freeze()
    }

    pub fn contains_log(&self) -> bool {
        self.flags.log()
    }

    pub fn contains_no_log(&self) -> bool {
        self.flags.no_log()
    }

    pub fn contains_audit_log(&self) -> bool {
        self.flags.audit_log()
    }

    pub fn contains_no_audit_log(&self) -> bool {
        self.flags.no_audit_log()
    }

    pub fn contains_block(&self) -> bool {
        self.flags.block()
    }

    pub fn contains_multi_match(&self) -> bool {
        self.flags.multi_match()
    }

    pub fn flags(&self) -> ActionFlags {
        self.flags
    }

    /// The active disruptive action, if one was declared or inherited.
    pub fn disruptive(&self) -> Option<&DisruptiveAction> {
        self.disruptive.as_deref()
    }

    /// Transformation pipeline applied to the candidate value before the
    /// rule's condition is evaluated.
    pub fn transforms(&self) -> &TransformPipeline {
        &self.transforms
    }

    /// Tags recorded against a match event, in declaration order.
    pub fn tags(&self) -> &[Arc<Tag>] {
        &self.tags
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Set-var directives executed on match, in declaration order.
    pub fn set_vars(&self) -> &[Arc<SetVar>] {
        &self.set_vars
    }

    /// Remaining match-time actions, executed in declaration order.
    pub fn runtime_actions(&self) -> &[Arc<RuntimeAction>] {
        &self.runtime_actions
    }
}

/// Declaration-phase accumulator for a rule's effective action set.
///
/// This is the only place mutation exists; [`freeze`](Self::freeze)
/// consumes the builder and hands out the immutable [`RuleActionSet`],
/// so post-load mutation is ruled out by the type system rather than by
/// convention.
#[derive(Debug, Default)]
pub struct ActionSetBuilder {
    set: RuleActionSet,
}

impl ActionSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every flag, empties every sequence and the disruptive
    /// slot. Idempotent.
    pub fn reset(&mut self) {
        self.set.flags.reset();
        self.set.disruptive = None;
        self.set.transforms.reset();
        self.set.tags.clear();
        self.set.set_vars.clear();
        self.set.runtime_actions.clear();
    }

    /// Overwrites the flag for `kind`; later writes win.
    pub fn set_flag(&mut self, kind: FlagKind, value: bool) {
        self.set.flags.set(kind, value);
    }

    /// Overwrites the disruptive slot wholesale. Two disruptive actions
    /// never co-exist; the last declared one wins.
    pub fn set_disruptive(&mut self, action: DisruptiveAction) {
        self.set.disruptive = Some(Arc::new(action));
    }

    pub fn add_transform(&mut self, transform: Transform) {
        self.set.transforms.push(Arc::new(transform));
    }

    /// The `t:none` marker: drops every transform accumulated so far,
    /// inherited or declared earlier in the same rule.
    pub fn reset_transforms(&mut self) {
        self.set.transforms.reset();
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.set.tags.push(Arc::new(tag));
    }

    pub fn extend_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        self.set.tags.extend(tags.into_iter().map(Arc::new));
    }

    pub fn add_set_var(&mut self, var: SetVar) {
        self.set.set_vars.push(Arc::new(var));
    }

    pub fn add_runtime_action(&mut self, action: RuntimeAction) {
        self.set.runtime_actions.push(Arc::new(action));
    }

    /// Applies one declared action according to its category semantics:
    /// flags and the disruptive slot overwrite, tag/set-var/runtime
    /// sequences accumulate, transforms accumulate with an explicit
    /// reset marker.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Disruptive { action } => self.set_disruptive(action.clone()),
            Action::Transform { transform } => self.add_transform(transform.clone()),
            Action::TransformNone => self.reset_transforms(),
            Action::Flag { kind, value } => self.set_flag(*kind, *value),
            Action::Tag { tag } => self.add_tag(tag.clone()),
            Action::SetVar { var } => self.add_set_var(var.clone()),
            Action::Runtime { action } => self.add_runtime_action(action.clone()),
        }
    }

    /// The merge entry point.
    ///
    /// Seeds the builder with a value-copy of the parent's state (flag
    /// record copied, disruptive action and sequence elements shared,
    /// sequence containers fresh), then replays the rule's own
    /// declarations in order through [`apply`](Self::apply). Calling it
    /// again overwrites from scratch; it is never cumulative across
    /// calls. The result depends only on the parent's effective state
    /// and the declaration order of `own`.
    pub fn populate(&mut self, own: &[Action], parent: Option<&RuleActionSet>) {
        self.reset();
        if let Some(parent) = parent {
            self.set = parent.clone();
        }
        for action in own {
            self.apply(action);
        }
        debug!(
            inherited = parent.is_some(),
            declared = own.len(),
            transforms = self.set.transforms.len(),
            disruptive = self.set.disruptive.is_some(),
            "merged action set"
        );
    }

    /// Ends the declaration phase and hands out the immutable set.
    pub fn freeze(self) -> RuleActionSet {
        self.set
    }
}
