use crate::scheduler::{plan, ExecutionPlan};
use chrono::Utc;
use dagcore::{
    EventBus, ExecutionEvent, ExecutionState, Graph, NodeError, ProgressObserver, RunId, Value,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-call execution options.
#[derive(Clone)]
pub struct ExecuteOptions {
    /// Halt the run on the first node failure (default), or capture
    /// failures in the state and keep going.
    pub stop_on_error: bool,
    /// Optional per-node progress listener.
    pub observer: Option<Arc<dyn ProgressObserver>>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            stop_on_error: true,
            observer: None,
        }
    }
}

impl ExecuteOptions {
    pub fn continue_on_error(mut self) -> Self {
        self.stop_on_error = false;
        self
    }

    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }
}

/// Final outcome of one `execute` call.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub run_id: RunId,
    /// False only for structural rejections and halted runs.
    pub success: bool,
    /// Terminal state: initial inputs plus every merged output or captured
    /// failure.
    pub outputs: ExecutionState,
    /// Completed (and, in continue mode, attempted) nodes in execution
    /// order; always a valid topological order of the declared edges.
    pub nodes_executed: Vec<String>,
    /// Wall clock from the start of validation to the last processed wave.
    pub duration: Duration,
    pub error: Option<String>,
}

/// Drives wave-by-wave execution of a graph.
///
/// Each call to [`execute`](GraphExecutor::execute) is an independent run:
/// the graph is only read, so concurrent runs against the same graph are
/// safe and produce independent states.
#[derive(Debug, Default)]
pub struct GraphExecutor;

impl GraphExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Executes `graph` to completion against `inputs`.
    ///
    /// Structural problems (unknown edge endpoints, cycles) surface as a
    /// failed report before any compute function runs. There is no timeout
    /// or cancellation: a compute function that never resolves stalls the
    /// run indefinitely.
    pub async fn execute(
        &self,
        graph: &Graph,
        event_bus: &EventBus,
        inputs: HashMap<String, Value>,
        options: ExecuteOptions,
    ) -> ExecutionReport {
        let run_id = RunId::new_v4();
        let started = Instant::now();

        event_bus.emit(ExecutionEvent::RunStarted {
            run_id,
            timestamp: Utc::now(),
        });
        tracing::info!("Starting graph execution: {}", run_id);

        let mut state = ExecutionState::with_inputs(inputs);
        let mut executed = Vec::new();

        let outcome = match plan(graph) {
            Ok(plan) => {
                self.run_waves(
                    graph, &plan, &mut state, &mut executed, event_bus, run_id, &options,
                )
                .await
            }
            Err(e) => {
                tracing::error!("Graph rejected: {}", e);
                Err(e.to_string())
            }
        };

        let duration = started.elapsed();
        let (success, error) = match outcome {
            Ok(()) => (true, None),
            Err(message) => (false, Some(message)),
        };

        event_bus.emit(ExecutionEvent::RunCompleted {
            run_id,
            success,
            duration_ms: duration.as_millis() as u64,
            timestamp: Utc::now(),
        });
        tracing::info!(
            "Graph execution {} finished in {}ms (success: {})",
            run_id,
            duration.as_millis(),
            success
        );

        ExecutionReport {
            run_id,
            success,
            outputs: state,
            nodes_executed: executed,
            duration,
            error,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_waves(
        &self,
        graph: &Graph,
        plan: &ExecutionPlan,
        state: &mut ExecutionState,
        executed: &mut Vec<String>,
        event_bus: &EventBus,
        run_id: RunId,
        options: &ExecuteOptions,
    ) -> Result<(), String> {
        for (wave_index, wave) in plan.waves().iter().enumerate() {
            event_bus.emit(ExecutionEvent::WaveStarted {
                run_id,
                wave: wave_index,
                nodes: wave.clone(),
                timestamp: Utc::now(),
            });

            // Every node in the wave reads the state as it existed at wave
            // start; writes are merged only after the whole wave settles.
            let snapshot = Arc::new(state.clone());
            let mut handles = Vec::with_capacity(wave.len());
            for name in wave {
                let compute = graph
                    .compute(name)
                    .ok_or_else(|| format!("unknown node \"{}\" in execution plan", name))?;
                let snapshot = Arc::clone(&snapshot);
                handles.push(tokio::spawn(async move {
                    let node_started = Instant::now();
                    let result = compute.run(&snapshot).await;
                    (result, node_started.elapsed().as_millis() as u64)
                }));
            }

            // The wave is a synchronization barrier.
            let settled = join_all(handles).await;

            let mut first_failure: Option<String> = None;
            for (name, joined) in wave.iter().zip(settled) {
                let (result, duration_ms) = match joined {
                    Ok(output) => output,
                    Err(e) => (Err(NodeError::Panicked(e.to_string())), 0),
                };
                match result {
                    Ok(output) => {
                        tracing::info!("Node {} completed in {}ms", name, duration_ms);
                        event_bus.emit(ExecutionEvent::NodeCompleted {
                            run_id,
                            node: name.clone(),
                            output: output.clone(),
                            duration_ms,
                            timestamp: Utc::now(),
                        });
                        state.set_output(name.clone(), output);
                        executed.push(name.clone());
                        notify(options, state, name);
                    }
                    Err(e) => {
                        tracing::error!("Node {} failed: {}", name, e);
                        event_bus.emit(ExecutionEvent::NodeFailed {
                            run_id,
                            node: name.clone(),
                            error: e.to_string(),
                            timestamp: Utc::now(),
                        });
                        if options.stop_on_error {
                            // Wave order is registration order, so the first
                            // failure seen here is the one to report.
                            if first_failure.is_none() {
                                first_failure =
                                    Some(format!("Node \"{}\" execution failed: {}", name, e));
                            }
                        } else {
                            state.set_failure(name.clone(), e.to_string());
                            executed.push(name.clone());
                            notify(options, state, name);
                        }
                    }
                }
            }

            if let Some(message) = first_failure {
                return Err(message);
            }
        }

        Ok(())
    }
}

fn notify(options: &ExecuteOptions, state: &ExecutionState, name: &str) {
    if let Some(observer) = &options.observer {
        if let Some(outcome) = state.get(name) {
            observer.on_node_complete(name, outcome);
        }
    }
}
