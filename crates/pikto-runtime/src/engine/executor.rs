//! The processing orchestrator.

use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::EngineConfig;
use super::processor::{Processor, ProcessorError, ProcessorOutput, ProcessorRequest};
use crate::error::{WorkflowError, WorkflowResult};
use crate::graph::{GraphStore, resolve_inputs};
use crate::node::{Node, NodeData, NodeId, NodeState, ResultNode};

/// Tracing target for orchestrator operations.
const TRACING_TARGET: &str = "pikto_runtime::engine";

/// The processing orchestrator.
///
/// Drives the per-node state machine: `Idle -> Running -> Succeeded |
/// Failed`, with `Succeeded` and `Failed` both re-invocable. Each node
/// is independent; multiple distinct nodes may have invocations in
/// flight concurrently, serialized only at the store lock. The single
/// mutual-exclusion rule is per-node: at most one in-flight invocation,
/// enforced by the `Running` guard in [`invoke`](Engine::invoke).
pub struct Engine {
    store: Arc<Mutex<GraphStore>>,
    processor: Arc<dyn Processor>,
    config: EngineConfig,
}

/// Outcome of an accepted [`Engine::invoke`] call.
#[derive(Debug)]
pub enum Invocation {
    /// The invocation was dispatched; the handle resolves when the
    /// processor call completes and its result has been applied.
    Started(JoinHandle<()>),
    /// The node already had an invocation in flight; nothing was done.
    AlreadyRunning,
}

impl Invocation {
    /// Returns whether a new invocation was dispatched.
    pub const fn is_started(&self) -> bool {
        matches!(self, Invocation::Started(_))
    }
}

impl Engine {
    /// Creates a new engine with default configuration and an empty
    /// graph.
    pub fn new(processor: Arc<dyn Processor>) -> Self {
        Self::with_config(processor, EngineConfig::default())
    }

    /// Creates a new engine with the given configuration.
    pub fn with_config(processor: Arc<dyn Processor>, config: EngineConfig) -> Self {
        tracing::info!(
            target: TRACING_TARGET,
            result_offset_x = config.result_offset_x,
            "Workflow engine initialized"
        );

        Self {
            store: Arc::new(Mutex::new(GraphStore::new())),
            processor,
            config,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a handle to the graph store.
    pub fn store(&self) -> Arc<Mutex<GraphStore>> {
        Arc::clone(&self.store)
    }

    /// Invokes processing for a node.
    ///
    /// Validates readiness and dispatches the external call without
    /// blocking other graph operations:
    ///
    /// 1. A node already `Running` is a silent no-op
    ///    ([`Invocation::AlreadyRunning`]), not an error.
    /// 2. Missing required config or inputs reject with no state
    ///    change: an edit node needs a non-empty prompt and at least
    ///    one resolved upstream artifact; a generate node needs a
    ///    non-empty prompt; upload and result nodes are not invocable.
    /// 3. On acceptance the node enters `Running`, its error clears,
    ///    and its inputs are snapshotted at this instant; later graph
    ///    changes do not retroactively alter the in-flight call.
    ///
    /// On success the node's output and state are updated and a result
    /// node is synthesized in the same store transaction. On failure
    /// the node enters `Failed` with the message; its output is left
    /// as it was before the invocation.
    pub async fn invoke(&self, node_id: NodeId) -> WorkflowResult<Invocation> {
        let request = {
            let mut store = self.store.lock().await;
            let node = store
                .node(node_id)
                .ok_or(WorkflowError::NodeNotFound(node_id))?;

            if node.is_running() {
                tracing::debug!(
                    target: TRACING_TARGET,
                    node_id = %node_id,
                    "Invocation already in flight; ignoring"
                );
                return Ok(Invocation::AlreadyRunning);
            }

            let request = match &node.data {
                NodeData::Generate(config) => {
                    if config.prompt.trim().is_empty() {
                        return Err(WorkflowError::InvalidNodeConfig {
                            node_id,
                            message: "generation prompt must not be empty".into(),
                        });
                    }
                    ProcessorRequest::Generate {
                        prompt: config.prompt.clone(),
                    }
                }
                NodeData::Edit(config) => {
                    if config.prompt.trim().is_empty() {
                        return Err(WorkflowError::InvalidNodeConfig {
                            node_id,
                            message: "edit prompt must not be empty".into(),
                        });
                    }
                    let inputs = resolve_inputs(&store, node_id);
                    if inputs.is_empty() {
                        return Err(WorkflowError::InvalidNodeConfig {
                            node_id,
                            message: "edit requires at least one upstream image".into(),
                        });
                    }
                    ProcessorRequest::Edit {
                        inputs,
                        prompt: config.prompt.clone(),
                    }
                }
                NodeData::Upload(_) | NodeData::Result(_) => {
                    return Err(WorkflowError::NotInvocable {
                        node_id,
                        kind: node.kind(),
                    });
                }
            };

            let node = store
                .node_mut(node_id)
                .ok_or(WorkflowError::NodeNotFound(node_id))?;
            node.state = NodeState::Running;
            node.error = None;
            request
        };

        tracing::debug!(
            target: TRACING_TARGET,
            node_id = %node_id,
            kind = request.kind(),
            "Dispatching node invocation"
        );

        let store = Arc::clone(&self.store);
        let processor = Arc::clone(&self.processor);
        let prompt = request.prompt().to_string();
        let offset = self.config.result_offset_x;

        let handle = tokio::spawn(async move {
            let result = processor.process(request).await;
            let mut store = store.lock().await;
            match result {
                Ok(output) => Self::apply_success(&mut store, node_id, &prompt, output, offset),
                Err(error) => Self::apply_failure(&mut store, node_id, error),
            }
        });

        Ok(Invocation::Started(handle))
    }

    /// Resets a node back to idle, dropping its output and error.
    pub async fn reset_node(&self, node_id: NodeId) -> WorkflowResult<()> {
        let mut store = self.store.lock().await;
        store.reset_node(node_id)
    }

    /// Applies a successful processor result: marks the origin node
    /// succeeded and synthesizes a result node, in one store
    /// transaction.
    fn apply_success(
        store: &mut GraphStore,
        node_id: NodeId,
        prompt: &str,
        output: ProcessorOutput,
        offset: f32,
    ) {
        let Some(node) = store.node_mut(node_id) else {
            tracing::warn!(
                target: TRACING_TARGET,
                node_id = %node_id,
                "Node removed while invocation was in flight; dropping result"
            );
            return;
        };

        node.state = NodeState::Succeeded;
        node.output = Some(output.artifact.clone());
        node.error = None;
        let position = node.position.offset_x(offset);

        // The result node is born with its output preset so it can
        // itself act as a source for further chaining.
        let result = Node::new(
            ResultNode {
                prompt: prompt.to_string(),
                description: output.description,
                generated_at: Timestamp::now(),
            },
            position,
        )
        .with_output(output.artifact);
        let result_id = result.id;

        // Fresh UUID; insertion cannot collide.
        if let Err(error) = store.add_node(result) {
            tracing::error!(
                target: TRACING_TARGET,
                node_id = %node_id,
                %error,
                "Failed to insert synthesized result node"
            );
            return;
        }

        tracing::info!(
            target: TRACING_TARGET,
            node_id = %node_id,
            result_id = %result_id,
            "Node invocation succeeded"
        );
    }

    /// Applies a processor failure: the node records the message and
    /// keeps whatever output it had before the invocation.
    fn apply_failure(store: &mut GraphStore, node_id: NodeId, error: ProcessorError) {
        let Some(node) = store.node_mut(node_id) else {
            tracing::warn!(
                target: TRACING_TARGET,
                node_id = %node_id,
                "Node removed while invocation was in flight; dropping failure"
            );
            return;
        };

        node.state = NodeState::Failed;
        node.error = Some(error.message.clone());

        tracing::warn!(
            target: TRACING_TARGET,
            node_id = %node_id,
            error = %error,
            "Node invocation failed"
        );
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Semaphore;
    use uuid::Uuid;

    use super::*;
    use crate::node::{Artifact, EditNode, GenerateNode, Position, UploadNode};

    /// Creates a deterministic NodeId for testing.
    fn test_node_id(n: u128) -> NodeId {
        NodeId::from_uuid(Uuid::from_u128(n))
    }

    fn artifact(tag: &str) -> Artifact {
        Artifact::new("image/png", tag.as_bytes().to_vec())
    }

    /// Scripted processor: counts calls, optionally waits for a gate
    /// permit before responding.
    struct MockProcessor {
        response: Result<ProcessorOutput, ProcessorError>,
        calls: AtomicUsize,
        gate: Option<Arc<Semaphore>>,
    }

    impl MockProcessor {
        fn succeeding(output: ProcessorOutput) -> Self {
            Self {
                response: Ok(output),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(ProcessorError::new(message)),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(output: ProcessorOutput, gate: Arc<Semaphore>) -> Self {
            Self {
                response: Ok(output),
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Processor for MockProcessor {
        async fn process(
            &self,
            _request: ProcessorRequest,
        ) -> Result<ProcessorOutput, ProcessorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await.expect("gate closed");
                permit.forget();
            }
            self.response.clone()
        }
    }

    async fn join(invocation: Invocation) {
        match invocation {
            Invocation::Started(handle) => handle.await.expect("invocation task panicked"),
            Invocation::AlreadyRunning => panic!("expected a dispatched invocation"),
        }
    }

    /// Seeds upload(1) -> edit(2) with the upload's output set.
    async fn seed_upload_edit(engine: &Engine, prompt: &str) {
        let store = engine.store();
        let mut store = store.lock().await;
        store
            .add_node(Node::with_id(
                test_node_id(1),
                UploadNode::default(),
                Position::new(100.0, 50.0),
            ))
            .unwrap();
        store
            .add_node(Node::with_id(
                test_node_id(2),
                EditNode {
                    prompt: prompt.to_string(),
                },
                Position::new(300.0, 50.0),
            ))
            .unwrap();
        store.set_node_output(test_node_id(1), artifact("imgA")).unwrap();
        store.connect(test_node_id(1), test_node_id(2)).unwrap();
    }

    #[tokio::test]
    async fn test_edit_invocation_succeeds_and_spawns_result() {
        let processor = Arc::new(MockProcessor::succeeding(
            ProcessorOutput::new(artifact("edited")).with_description("snowy"),
        ));
        let engine = Engine::new(processor);
        seed_upload_edit(&engine, "add snow").await;

        join(engine.invoke(test_node_id(2)).await.unwrap()).await;

        let store = engine.store();
        let store = store.lock().await;

        let edit = store.node(test_node_id(2)).unwrap();
        assert_eq!(edit.state, NodeState::Succeeded);
        assert_eq!(edit.output, Some(artifact("edited")));
        assert_eq!(edit.error, None);

        let result = store
            .nodes()
            .find(|node| node.data.is_result())
            .expect("result node synthesized");
        assert_eq!(result.state, NodeState::Succeeded);
        assert_eq!(result.output, Some(artifact("edited")));
        assert_eq!(result.position, Position::new(700.0, 50.0));
        assert_eq!(result.data.prompt(), Some("add snow"));

        // Synthesized with no edges of its own.
        assert_eq!(store.incoming_edges(result.id).count(), 0);
        assert_eq!(store.outgoing_edges(result.id).count(), 0);
    }

    #[tokio::test]
    async fn test_generate_with_empty_prompt_rejected_idle() {
        let processor = Arc::new(MockProcessor::succeeding(ProcessorOutput::new(artifact("g"))));
        let engine = Engine::new(processor.clone());
        {
            let store = engine.store();
            let mut store = store.lock().await;
            store
                .add_node(Node::with_id(
                    test_node_id(1),
                    GenerateNode::default(),
                    Position::default(),
                ))
                .unwrap();
        }

        let err = engine.invoke(test_node_id(1)).await.unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidNodeConfig { .. }));
        assert_eq!(processor.call_count(), 0);

        let store = engine.store();
        let store = store.lock().await;
        assert_eq!(store.node(test_node_id(1)).unwrap().state, NodeState::Idle);
    }

    #[tokio::test]
    async fn test_edit_without_inputs_rejected() {
        let processor = Arc::new(MockProcessor::succeeding(ProcessorOutput::new(artifact("e"))));
        let engine = Engine::new(processor);
        {
            let store = engine.store();
            let mut store = store.lock().await;
            store
                .add_node(Node::with_id(
                    test_node_id(1),
                    EditNode {
                        prompt: "add snow".into(),
                    },
                    Position::default(),
                ))
                .unwrap();
        }

        let err = engine.invoke(test_node_id(1)).await.unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidNodeConfig { .. }));
    }

    #[tokio::test]
    async fn test_upload_and_result_not_invocable() {
        let processor = Arc::new(MockProcessor::succeeding(ProcessorOutput::new(artifact("x"))));
        let engine = Engine::new(processor);
        {
            let store = engine.store();
            let mut store = store.lock().await;
            store
                .add_node(Node::with_id(
                    test_node_id(1),
                    UploadNode::default(),
                    Position::default(),
                ))
                .unwrap();
            store
                .add_node(Node::with_id(
                    test_node_id(2),
                    ResultNode {
                        prompt: "add snow".into(),
                        description: None,
                        generated_at: Timestamp::now(),
                    },
                    Position::default(),
                ))
                .unwrap();
        }

        let upload_err = engine.invoke(test_node_id(1)).await.unwrap_err();
        assert!(matches!(upload_err, WorkflowError::NotInvocable { .. }));

        let result_err = engine.invoke(test_node_id(2)).await.unwrap_err();
        assert!(matches!(result_err, WorkflowError::NotInvocable { .. }));
    }

    #[tokio::test]
    async fn test_reentrant_invoke_is_noop_with_single_processor_call() {
        let gate = Arc::new(Semaphore::new(0));
        let processor = Arc::new(MockProcessor::gated(
            ProcessorOutput::new(artifact("edited")),
            gate.clone(),
        ));
        let engine = Engine::new(processor.clone());
        seed_upload_edit(&engine, "add snow").await;

        let first = engine.invoke(test_node_id(2)).await.unwrap();
        assert!(first.is_started());

        // The first call is parked on the gate; a second invoke must
        // be a silent no-op.
        let second = engine.invoke(test_node_id(2)).await.unwrap();
        assert!(matches!(second, Invocation::AlreadyRunning));

        gate.add_permits(1);
        join(first).await;

        assert_eq!(processor.call_count(), 1);
        let store = engine.store();
        let store = store.lock().await;
        assert_eq!(
            store.node(test_node_id(2)).unwrap().state,
            NodeState::Succeeded
        );
        // Exactly one result node from exactly one transition.
        assert_eq!(store.nodes().filter(|n| n.data.is_result()).count(), 1);
    }

    #[tokio::test]
    async fn test_failure_records_message_and_keeps_prior_output() {
        let processor = Arc::new(MockProcessor::failing("quota exhausted"));
        let engine = Engine::new(processor);
        seed_upload_edit(&engine, "add snow").await;

        join(engine.invoke(test_node_id(2)).await.unwrap()).await;

        let store = engine.store();
        let store = store.lock().await;
        let edit = store.node(test_node_id(2)).unwrap();
        assert_eq!(edit.state, NodeState::Failed);
        assert_eq!(edit.error.as_deref(), Some("quota exhausted"));
        // Output was unset before the invocation and stays unset.
        assert_eq!(edit.output, None);
        // The upstream node is untouched.
        assert_eq!(
            store.node(test_node_id(1)).unwrap().state,
            NodeState::Succeeded
        );
        // No result node on failure.
        assert!(store.nodes().all(|n| !n.data.is_result()));
    }

    #[tokio::test]
    async fn test_inputs_snapshotted_at_invocation() {
        let gate = Arc::new(Semaphore::new(0));
        let processor = Arc::new(MockProcessor::gated(
            ProcessorOutput::new(artifact("edited")),
            gate.clone(),
        ));
        let engine = Engine::new(processor);
        seed_upload_edit(&engine, "add snow").await;

        let invocation = engine.invoke(test_node_id(2)).await.unwrap();

        // Remove the upstream node while the call is parked in flight.
        {
            let store = engine.store();
            let mut store = store.lock().await;
            store.remove_node(test_node_id(1)).unwrap();
        }

        gate.add_permits(1);
        join(invocation).await;

        let store = engine.store();
        let store = store.lock().await;
        assert_eq!(
            store.node(test_node_id(2)).unwrap().state,
            NodeState::Succeeded
        );
    }

    #[tokio::test]
    async fn test_node_removed_in_flight_drops_result() {
        let gate = Arc::new(Semaphore::new(0));
        let processor = Arc::new(MockProcessor::gated(
            ProcessorOutput::new(artifact("edited")),
            gate.clone(),
        ));
        let engine = Engine::new(processor);
        seed_upload_edit(&engine, "add snow").await;

        let invocation = engine.invoke(test_node_id(2)).await.unwrap();
        {
            let store = engine.store();
            let mut store = store.lock().await;
            store.remove_node(test_node_id(2)).unwrap();
        }

        gate.add_permits(1);
        join(invocation).await;

        let store = engine.store();
        let store = store.lock().await;
        assert!(!store.contains_node(test_node_id(2)));
        assert!(store.nodes().all(|n| !n.data.is_result()));
    }

    #[tokio::test]
    async fn test_failed_node_can_be_retried() {
        let processor = Arc::new(MockProcessor::failing("backend down"));
        let engine = Engine::new(processor);
        seed_upload_edit(&engine, "add snow").await;

        join(engine.invoke(test_node_id(2)).await.unwrap()).await;

        // Retry clears the recorded error on acceptance.
        let retry = engine.invoke(test_node_id(2)).await.unwrap();
        assert!(retry.is_started());
        join(retry).await;

        let store = engine.store();
        let store = store.lock().await;
        let edit = store.node(test_node_id(2)).unwrap();
        assert_eq!(edit.state, NodeState::Failed);
        assert_eq!(edit.error.as_deref(), Some("backend down"));
    }
}
