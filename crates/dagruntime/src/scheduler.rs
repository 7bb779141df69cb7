use dagcore::{Graph, GraphError};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Ordered waves of node names.
///
/// Wave *i + 1* contains only nodes whose predecessors all sit in waves
/// ≤ *i*; within a wave, nodes keep their registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    waves: Vec<Vec<String>>,
}

impl ExecutionPlan {
    pub fn waves(&self) -> &[Vec<String>] {
        &self.waves
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    pub fn node_count(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }
}

/// Validates the graph and derives its execution plan.
///
/// Edges are resolved in declaration order, so the first edge naming an
/// unregistered endpoint determines the reported error. Waves come out of
/// iterative in-degree peeling (Kahn); nodes still unpeeled when no ready
/// node remains form a cycle. A self-edge never reaches zero in-degree, so
/// self-loops are caught by the same check.
pub fn plan(graph: &Graph) -> Result<ExecutionPlan, GraphError> {
    let mut dag: DiGraph<String, ()> = DiGraph::new();
    let mut index_of: HashMap<&str, NodeIndex> = HashMap::new();

    for name in graph.node_names() {
        let idx = dag.add_node(name.to_string());
        index_of.insert(name, idx);
    }

    for edge in graph.edges() {
        let from = *index_of.get(edge.from.as_str()).ok_or_else(|| {
            GraphError::MissingSource {
                from: edge.from.clone(),
                to: edge.to.clone(),
            }
        })?;
        let to = *index_of.get(edge.to.as_str()).ok_or_else(|| {
            GraphError::MissingTarget {
                from: edge.from.clone(),
                to: edge.to.clone(),
            }
        })?;
        // edges are a set for scheduling purposes; duplicates collapse here
        dag.update_edge(from, to, ());
    }

    let mut in_degree: HashMap<NodeIndex, usize> = dag
        .node_indices()
        .map(|idx| (idx, dag.neighbors_directed(idx, Direction::Incoming).count()))
        .collect();

    // node_indices() is ascending, which is registration order
    let mut ready: Vec<NodeIndex> = dag
        .node_indices()
        .filter(|idx| in_degree[idx] == 0)
        .collect();

    let mut peeled = 0;
    let mut waves = Vec::new();

    while !ready.is_empty() {
        peeled += ready.len();

        let mut next = Vec::new();
        for &idx in &ready {
            for succ in dag.neighbors_directed(idx, Direction::Outgoing) {
                if let Some(degree) = in_degree.get_mut(&succ) {
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(succ);
                    }
                }
            }
        }
        next.sort_unstable_by_key(|idx| idx.index());

        waves.push(ready.iter().map(|&idx| dag[idx].clone()).collect());
        ready = next;
    }

    if peeled != dag.node_count() {
        return Err(GraphError::CycleDetected {
            remaining: dag.node_count() - peeled,
        });
    }

    Ok(ExecutionPlan { waves })
}
