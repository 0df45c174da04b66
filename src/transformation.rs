use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Named normalization step applied to a candidate value before it is
/// compared against a rule's condition.
///
/// Identified by name only; the behaviour lives in the matching engine.
/// Pipelines are never deduplicated, the same transform may run twice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Transform(String);

impl Transform {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Transform {
    fn from(value: &str) -> Self {
        Transform::new(value)
    }
}

impl From<String> for Transform {
    fn from(value: String) -> Self {
        Transform::new(value)
    }
}

/// Ordered transformation pipeline.
///
/// Order of addition is execution order: each step's output feeds the
/// next. Mutable only during the declaration phase; the reset marker in
/// a declaration stream is consumed by the merge and never stored here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformPipeline {
    steps: Vec<Arc<Transform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: Arc<Transform>) {
        self.steps.push(step);
    }

    /// Drops every step accumulated so far.
    pub(crate) fn reset(&mut self) {
        self.steps.clear();
    }

    pub fn steps(&self) -> &[Arc<Transform>] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transform> {
        self.steps.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pipeline: &TransformPipeline) -> Vec<&str> {
        pipeline.iter().map(Transform::as_str).collect()
    }

    #[test]
    fn preserves_addition_order() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Arc::new(Transform::new("lowercase")));
        pipeline.push(Arc::new(Transform::new("url_decode")));
        pipeline.push(Arc::new(Transform::new("compress_whitespace")));

        assert_eq!(
            names(&pipeline),
            vec!["lowercase", "url_decode", "compress_whitespace"]
        );
    }

    #[test]
    fn keeps_repeated_steps() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Arc::new(Transform::new("url_decode")));
        pipeline.push(Arc::new(Transform::new("url_decode")));

        assert_eq!(pipeline.len(), 2, "double decoding is meaningful");
    }

    #[test]
    fn reset_empties_the_pipeline() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(Arc::new(Transform::new("lowercase")));
        pipeline.reset();

        assert!(pipeline.is_empty());
        assert_eq!(names(&pipeline), Vec::<&str>::new());
    }
}
