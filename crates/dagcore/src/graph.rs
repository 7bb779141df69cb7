use crate::{Compute, GraphError};
use std::fmt;
use std::sync::Arc;

/// A dependency edge: `to` depends on `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

struct NodeEntry {
    name: String,
    compute: Arc<dyn Compute>,
}

/// The graph model: registered compute nodes and declared dependency edges.
///
/// Pure bookkeeping. Edge endpoints are resolved lazily when the graph is
/// executed, so an edge may reference a name that is registered later or
/// never; that only fails at execution time. Nodes keep registration
/// order, which the scheduler uses to make wave order deterministic.
///
/// The model is read-only during execution; `execute` may be called any
/// number of times against the same graph, concurrently included.
#[derive(Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compute step under `name`.
    ///
    /// Rejects duplicate names; the model is left unchanged on failure.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        compute: impl Compute + 'static,
    ) -> Result<(), GraphError> {
        let name = name.into();
        if self.has_node(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        tracing::debug!("Registering node: {}", name);
        self.nodes.push(NodeEntry {
            name,
            compute: Arc::new(compute),
        });
        Ok(())
    }

    /// Declares that `to` depends on `from`. Endpoints are not checked here.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
        });
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|entry| entry.name == name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node names in registration order.
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The compute step registered under `name`.
    pub fn compute(&self, name: &str) -> Option<Arc<dyn Compute>> {
        self.nodes
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| Arc::clone(&entry.compute))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Discards all nodes and edges, returning the model to its initial
    /// state for reuse.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_names())
            .field("edges", &self.edges)
            .finish()
    }
}
