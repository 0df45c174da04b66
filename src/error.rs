use thiserror::Error;

/// Errors raised while assembling a rule base.
///
/// The merge path itself is infallible on well-formed input; only the
/// load-time wiring of scopes and rules can go wrong.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("duplicate rule identifier detected: {id}")]
    DuplicateRule { id: String },
    #[error("duplicate default-action scope: {name}")]
    DuplicateScope { name: String },
    #[error("unknown default-action scope: {name}")]
    UnknownScope { name: String },
}
