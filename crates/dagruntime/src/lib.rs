//! Wave-scheduled execution runtime for `dagcore` graphs
//!
//! This crate turns a validated graph into an ordered sequence of waves and
//! drives them to completion: every node of a wave runs concurrently, the
//! wave is a synchronization barrier, and the merged execution state flows
//! into the next wave.

mod executor;
mod runtime;
mod scheduler;

pub use executor::{ExecuteOptions, ExecutionReport, GraphExecutor};
pub use runtime::{DagRuntime, GraphId, RuntimeConfig, RuntimeError};
pub use scheduler::{plan, ExecutionPlan};
