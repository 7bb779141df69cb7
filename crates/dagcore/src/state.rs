use crate::{NodeError, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry in the execution state: a value produced by a node (or supplied
/// as an initial input), or a failure captured in continue-on-error mode.
///
/// Serializes untagged, so an output keeps the `Value` wire shape and a
/// failure becomes `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StateValue {
    Output(Value),
    Failure { error: String },
}

impl StateValue {
    pub fn as_output(&self) -> Option<&Value> {
        match self {
            StateValue::Output(value) => Some(value),
            StateValue::Failure { .. } => None,
        }
    }

    pub fn as_failure(&self) -> Option<&str> {
        match self {
            StateValue::Failure { error } => Some(error),
            StateValue::Output(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StateValue::Failure { .. })
    }
}

/// Accumulating map of initial inputs and per-node outcomes.
///
/// Keys are initial-input field names or node names. The state is seeded
/// once from the caller's inputs; each node's outcome is merged under its
/// own name after the node's wave settles. Cloning produces the per-wave
/// snapshot that running nodes read, so writes never race with readers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExecutionState {
    entries: HashMap<String, StateValue>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the state with the caller-supplied initial inputs.
    pub fn with_inputs(inputs: HashMap<String, Value>) -> Self {
        Self {
            entries: inputs
                .into_iter()
                .map(|(key, value)| (key, StateValue::Output(value)))
                .collect(),
        }
    }

    pub fn set_output(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), StateValue::Output(value));
    }

    pub fn set_failure(&mut self, name: impl Into<String>, error: impl Into<String>) {
        self.entries
            .insert(name.into(), StateValue::Failure { error: error.into() });
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    /// The successful value under `key`, if any.
    pub fn output(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(StateValue::as_output)
    }

    /// The captured failure message under `key`, if any.
    pub fn failure(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(StateValue::as_failure)
    }

    /// Successful value under `key`, or a `MissingInput` error for compute
    /// functions that cannot proceed without it.
    pub fn require(&self, key: &str) -> Result<&Value, NodeError> {
        self.output(key)
            .ok_or_else(|| NodeError::MissingInput(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StateValue)> {
        self.entries.iter()
    }
}
