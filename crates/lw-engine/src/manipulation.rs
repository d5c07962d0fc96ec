//! Post-manipulation: transformation steps applied to already-parsed records.

use std::sync::Arc;

use lw_errors::LogParserDefect;

use crate::registry::BoxError;

/// One transformation step over a batch of parsed records.
pub trait PostManipulation<T>: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, records: Vec<T>) -> Result<Vec<T>, BoxError>;
}

/// A step built from a closure.
pub struct FnStep<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a named post-manipulation step.
pub fn step_fn<T, F>(name: impl Into<String>, f: F) -> FnStep<F>
where
    F: Fn(Vec<T>) -> Result<Vec<T>, BoxError> + Send + Sync,
{
    FnStep {
        name: name.into(),
        f,
    }
}

impl<T, F> PostManipulation<T> for FnStep<F>
where
    F: Fn(Vec<T>) -> Result<Vec<T>, BoxError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, records: Vec<T>) -> Result<Vec<T>, BoxError> {
        (self.f)(records)
    }
}

/// Ordered chain of post-manipulation steps.
pub struct Pipeline<T> {
    steps: Vec<Box<dyn PostManipulation<T>>>,
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T> Pipeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: impl PostManipulation<T> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, raising `LogParserPostManipulation` on the
    /// first failure.
    pub fn run(&self, records: Vec<T>) -> Vec<T> {
        self.try_run(records)
            .unwrap_or_else(|defect| defect.raise())
    }

    pub fn try_run(&self, mut records: Vec<T>) -> Result<Vec<T>, LogParserDefect> {
        for step in &self.steps {
            let before = records.len();
            records = step.apply(records).map_err(|e| {
                LogParserDefect::post_manipulation_caused_by(
                    format!("step '{}' failed", step.name()),
                    Arc::from(e),
                )
            })?;
            tracing::debug!(
                step = step.name(),
                before,
                after = records.len(),
                "post-manipulation step applied"
            );
        }
        Ok(records)
    }
}
