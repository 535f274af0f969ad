//! Directed edges between workflow nodes.

use serde::{Deserialize, Serialize};

use crate::node::{EdgeId, NodeId};

/// A directed edge routing one node's output to another node's input
/// set. Edges carry no weight or label semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge ID.
    pub id: EdgeId,
    /// Node whose output feeds this edge.
    pub source: NodeId,
    /// Node receiving the input.
    pub target: NodeId,
}

impl Edge {
    /// Creates a new edge with a fresh ID.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
        }
    }

    /// Returns whether this edge touches the given node.
    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}
