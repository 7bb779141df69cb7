use crate::{ExecutionState, NodeError, Value};
use async_trait::async_trait;

/// The unit of work a node wraps.
///
/// Implementations receive a read-only snapshot of the execution state as it
/// existed when their wave started and produce a single output value. The
/// engine treats the work as opaque: it only observes success or failure and
/// the returned value.
#[async_trait]
pub trait Compute: Send + Sync {
    async fn run(&self, state: &ExecutionState) -> Result<Value, NodeError>;
}

/// Plain functions and closures are compute steps as-is; async work
/// implements [`Compute`] directly on a type.
#[async_trait]
impl<F> Compute for F
where
    F: Fn(&ExecutionState) -> Result<Value, NodeError> + Send + Sync,
{
    async fn run(&self, state: &ExecutionState) -> Result<Value, NodeError> {
        self(state)
    }
}

/// Wraps a closure as a [`Compute`] step.
///
/// Registering a closure through this helper lets the compiler infer its
/// argument types, so call sites stay free of annotations:
///
/// ```ignore
/// graph.add_node("double", compute_fn(|state| {
///     let value = state.require("input")?.as_f64().unwrap_or(0.0);
///     Ok(Value::from(value * 2.0))
/// }))?;
/// ```
pub fn compute_fn<F>(f: F) -> F
where
    F: Fn(&ExecutionState) -> Result<Value, NodeError> + Send + Sync,
{
    f
}
