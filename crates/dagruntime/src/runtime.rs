use crate::{ExecuteOptions, ExecutionReport, GraphExecutor};
use dagcore::{EventBus, ExecutionEvent, Graph, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

pub type GraphId = Uuid;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("graph not found: {0}")]
    GraphNotFound(GraphId),
}

/// Embeddable runtime owning the executor, the event bus, and an id-keyed
/// registry of graphs.
pub struct DagRuntime {
    executor: Arc<GraphExecutor>,
    event_bus: Arc<EventBus>,
    graphs: Arc<RwLock<HashMap<GraphId, Graph>>>,
}

impl DagRuntime {
    /// Creates a runtime with default settings.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            executor: Arc::new(GraphExecutor::new()),
            event_bus: Arc::new(EventBus::new(config.event_buffer_size)),
            graphs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores a graph and returns the id it is addressable under.
    pub async fn register_graph(&self, graph: Graph) -> GraphId {
        let id = Uuid::new_v4();
        self.graphs.write().await.insert(id, graph);
        id
    }

    /// Executes a registered graph with default options.
    pub async fn execute_graph(
        &self,
        id: GraphId,
        inputs: HashMap<String, Value>,
    ) -> Result<ExecutionReport, RuntimeError> {
        self.execute_graph_with(id, inputs, ExecuteOptions::default())
            .await
    }

    pub async fn execute_graph_with(
        &self,
        id: GraphId,
        inputs: HashMap<String, Value>,
        options: ExecuteOptions,
    ) -> Result<ExecutionReport, RuntimeError> {
        let graphs = self.graphs.read().await;
        let graph = graphs.get(&id).ok_or(RuntimeError::GraphNotFound(id))?;
        Ok(self
            .executor
            .execute(graph, &self.event_bus, inputs, options)
            .await)
    }

    /// Executes a graph directly (without registration).
    pub async fn execute(
        &self,
        graph: &Graph,
        inputs: HashMap<String, Value>,
    ) -> ExecutionReport {
        self.execute_with(graph, inputs, ExecuteOptions::default())
            .await
    }

    pub async fn execute_with(
        &self,
        graph: &Graph,
        inputs: HashMap<String, Value>,
        options: ExecuteOptions,
    ) -> ExecutionReport {
        self.executor
            .execute(graph, &self.event_bus, inputs, options)
            .await
    }

    /// Subscribes to execution events.
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<ExecutionEvent> {
        self.event_bus.subscribe()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}

impl Default for DagRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1000,
        }
    }
}
