//! Serializable workflow snapshot.

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::store::GraphStore;
use crate::error::{WorkflowError, WorkflowResult};
use crate::node::Node;

/// Serializable snapshot of a workflow graph.
///
/// This is the JSON-friendly representation handed to and received
/// from the UI layer. Use [`GraphStore::to_definition`] and
/// [`GraphStore::from_definition`] to convert between the two.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Nodes in the workflow.
    pub nodes: Vec<Node>,
    /// Edges connecting nodes, in resolution order.
    pub edges: Vec<Edge>,
}

impl WorkflowDefinition {
    /// Creates a new empty workflow definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts this definition into a graph store.
    ///
    /// Returns an error if node IDs collide or any edge references a
    /// non-existent node.
    pub fn into_store(self) -> WorkflowResult<GraphStore> {
        GraphStore::from_definition(self)
    }
}

impl GraphStore {
    /// Converts the graph to a serializable definition.
    pub fn to_definition(&self) -> WorkflowDefinition {
        WorkflowDefinition {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().to_vec(),
        }
    }

    /// Creates a graph store from a definition.
    pub fn from_definition(definition: WorkflowDefinition) -> WorkflowResult<Self> {
        let mut store = Self::new();
        for node in definition.nodes {
            store.add_node(node)?;
        }
        for edge in definition.edges {
            store.add_edge(edge)?;
        }
        Ok(store)
    }
}

impl TryFrom<WorkflowDefinition> for GraphStore {
    type Error = WorkflowError;

    fn try_from(definition: WorkflowDefinition) -> Result<Self, Self::Error> {
        Self::from_definition(definition)
    }
}

impl From<&GraphStore> for WorkflowDefinition {
    fn from(store: &GraphStore) -> Self {
        store.to_definition()
    }
}
