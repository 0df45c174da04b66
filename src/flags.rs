use serde::{Deserialize, Serialize};

/// The boolean evaluation toggles a rule can declare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    Log,
    NoLog,
    AuditLog,
    NoAuditLog,
    Block,
    MultiMatch,
}

/// The six independent flags carried by an effective action set.
///
/// Each field holds the latest declared value for its category. No flag
/// implies another, and contradictory combinations (`log` and `no_log`
/// both set) are left for the matching engine to interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFlags {
    log: bool,
    no_log: bool,
    audit_log: bool,
    no_audit_log: bool,
    block: bool,
    multi_match: bool,
}

impl ActionFlags {
    /// Overwrites the flag for `kind` with `value`.
    pub fn set(&mut self, kind: FlagKind, value: bool) {
        match kind {
            FlagKind::Log => self.log = value,
            FlagKind::NoLog => self.no_log = value,
            FlagKind::AuditLog => self.audit_log = value,
            FlagKind::NoAuditLog => self.no_audit_log = value,
            FlagKind::Block => self.block = value,
            FlagKind::MultiMatch => self.multi_match = value,
        }
    }

    pub fn get(&self, kind: FlagKind) -> bool {
        match kind {
            FlagKind::Log => self.log,
            FlagKind::NoLog => self.no_log,
            FlagKind::AuditLog => self.audit_log,
            FlagKind::NoAuditLog => self.no_audit_log,
            FlagKind::Block => self.block,
            FlagKind::MultiMatch => self.multi_match,
        }
    }

    pub fn log(&self) -> bool {
        self.log
    }

    pub fn no_log(&self) -> bool {
        self.no_log
    }

    pub fn audit_log(&self) -> bool {
        self.audit_log
    }

    pub fn no_audit_log(&self) -> bool {
        self.no_audit_log
    }

    pub fn block(&self) -> bool {
        self.block
    }

    pub fn multi_match(&self) -> bool {
        self.multi_match
    }

    pub(crate) fn reset(&mut self) {
        *self = ActionFlags::default();
    }
}
