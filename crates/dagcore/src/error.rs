use thiserror::Error;

/// Structural problems with a graph: rejected registrations and the
/// validation failures detected before any node runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node \"{0}\" is already registered")]
    DuplicateNode(String),

    #[error("edge \"{from}\" -> \"{to}\" references non-existent source node \"{from}\"")]
    MissingSource { from: String, to: String },

    #[error("edge \"{from}\" -> \"{to}\" references non-existent target node \"{to}\"")]
    MissingTarget { from: String, to: String },

    #[error("dependency cycle detected: {remaining} node(s) can never become ready")]
    CycleDetected { remaining: usize },
}

/// Failure of a single compute function.
#[derive(Error, Debug, Clone)]
pub enum NodeError {
    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("{0}")]
    ExecutionFailed(String),

    #[error("node task panicked: {0}")]
    Panicked(String),
}
