use crate::{StateValue, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

pub type RunId = Uuid;

/// Events emitted during graph execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExecutionEvent {
    RunStarted {
        run_id: RunId,
        timestamp: DateTime<Utc>,
    },
    WaveStarted {
        run_id: RunId,
        wave: usize,
        nodes: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    NodeCompleted {
        run_id: RunId,
        node: String,
        output: Value,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
    NodeFailed {
        run_id: RunId,
        node: String,
        error: String,
        timestamp: DateTime<Utc>,
    },
    RunCompleted {
        run_id: RunId,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
}

/// Broadcast bus for execution events.
///
/// Lossy by design: emitting with no subscribers (or to a lagging one) is
/// not an error.
pub struct EventBus {
    sender: broadcast::Sender<ExecutionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExecutionEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ExecutionEvent) {
        let _ = self.sender.send(event);
    }
}

/// Listener for per-node progress.
///
/// Invoked synchronously between waves, exactly once per completed node (or,
/// in continue-on-error mode, per attempted node) in wave-then-registration
/// order. Nodes skipped by a halt are never reported.
pub trait ProgressObserver: Send + Sync {
    fn on_node_complete(&self, name: &str, outcome: &StateValue);
}

impl<F> ProgressObserver for F
where
    F: Fn(&str, &StateValue) + Send + Sync,
{
    fn on_node_complete(&self, name: &str, outcome: &StateValue) {
        self(name, outcome)
    }
}
