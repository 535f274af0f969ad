//! Workflow service facade for the UI layer.

use std::sync::Arc;

use derive_more::{Deref, DerefMut};

use crate::engine::{Engine, EngineConfig, Processor};
use crate::error::{WorkflowError, WorkflowResult};
use crate::graph::WorkflowDefinition;
use crate::node::{Artifact, NodeId, NodePatch};

/// Workflow service for the canvas layer.
///
/// Wraps the processing [`Engine`] and adds the conveniences the UI
/// needs: seeding uploaded images, exporting produced artifacts, and
/// snapshotting the graph for transport.
///
/// This service derefs to the underlying [`Engine`], allowing direct
/// access to all engine methods.
#[derive(Debug, Deref, DerefMut)]
pub struct WorkflowService {
    #[deref]
    #[deref_mut]
    engine: Engine,
}

impl WorkflowService {
    /// Creates a new service with default engine configuration.
    #[must_use]
    pub fn new(processor: Arc<dyn Processor>) -> Self {
        Self {
            engine: Engine::new(processor),
        }
    }

    /// Creates a new service with custom engine configuration.
    #[must_use]
    pub fn with_config(processor: Arc<dyn Processor>, config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_config(processor, config),
        }
    }

    /// Returns a reference to the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Seeds an upload node with its image.
    ///
    /// The artifact becomes the node's output so downstream nodes can
    /// resolve it immediately.
    pub async fn seed_upload(
        &self,
        node_id: NodeId,
        artifact: Artifact,
        file_name: Option<String>,
    ) -> WorkflowResult<()> {
        let store = self.engine.store();
        let mut store = store.lock().await;
        store.set_node_output(node_id, artifact)?;
        if let Some(file_name) = file_name {
            store.update_node(node_id, &NodePatch::new().with_file_name(file_name))?;
        }
        Ok(())
    }

    /// Retrieves a node's output artifact for download or display.
    pub async fn export_artifact(&self, node_id: NodeId) -> WorkflowResult<Artifact> {
        let store = self.engine.store();
        let store = store.lock().await;
        let node = store
            .node(node_id)
            .ok_or(WorkflowError::NodeNotFound(node_id))?;
        node.output
            .clone()
            .ok_or_else(|| WorkflowError::InvalidNodeConfig {
                node_id,
                message: "node has no output artifact".into(),
            })
    }

    /// Takes a serializable snapshot of the current graph.
    pub async fn snapshot(&self) -> WorkflowDefinition {
        let store = self.engine.store();
        let store = store.lock().await;
        store.to_definition()
    }

    /// Replaces the current graph with a definition.
    ///
    /// Rejected without mutation if the definition is inconsistent.
    pub async fn restore(&self, definition: WorkflowDefinition) -> WorkflowResult<()> {
        let replacement = definition.into_store()?;
        let store = self.engine.store();
        let mut store = store.lock().await;
        *store = replacement;
        Ok(())
    }

    /// Clears the workflow.
    pub async fn clear(&self) {
        let store = self.engine.store();
        let mut store = store.lock().await;
        store.clear();
    }
}
