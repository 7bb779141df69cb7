//! Core abstractions for the DAG workflow engine
//!
//! This crate provides the fundamental types that the runtime crate builds
//! on: the dynamic `Value`, the shared `ExecutionState`, the `Compute` trait
//! every node implements, the graph model itself, and the execution events.

mod error;
mod events;
mod graph;
mod node;
mod state;
mod value;

pub use error::{GraphError, NodeError};
pub use events::{EventBus, ExecutionEvent, ProgressObserver, RunId};
pub use graph::{Edge, Graph};
pub use node::{compute_fn, Compute};
pub use state::{ExecutionState, StateValue};
pub use value::Value;
