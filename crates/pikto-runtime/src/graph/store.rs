//! Authoritative in-memory graph state.

use std::collections::{HashMap, HashSet};

use super::edge::Edge;
use crate::error::{WorkflowError, WorkflowResult};
use crate::node::{Artifact, EdgeId, Node, NodeId, NodePatch, NodeState};

/// The authoritative owner of all nodes and edges in a workflow.
///
/// All mutations go through the methods below; each leaves the graph
/// consistent: node IDs are unique, every edge endpoint references an
/// existing node, and removing a node cascades to its edges so no
/// dangling edge is ever observable.
///
/// Edges are kept in insertion order. Input resolution scans them in
/// that order, which is a deliberate tie-break and not a guarantee of
/// visual left-to-right arrangement on the canvas.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Nodes keyed by ID.
    nodes: HashMap<NodeId, Node>,
    /// Edges in insertion order.
    edges: Vec<Edge>,
}

impl GraphStore {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node to the graph.
    ///
    /// Fails if a node with the same ID is already present.
    pub fn add_node(&mut self, node: Node) -> WorkflowResult<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(WorkflowError::DuplicateNode(node.id));
        }
        let id = node.id;
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Applies a shallow-merge update to a node's config.
    ///
    /// Fields absent from the patch are untouched; config edits never
    /// clear output or processing state implicitly.
    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) -> WorkflowResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(WorkflowError::NodeNotFound(id))?;
        patch.apply(node);
        Ok(())
    }

    /// Removes a node, cascading removal of every edge that touches it.
    pub fn remove_node(&mut self, id: NodeId) -> WorkflowResult<Node> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(WorkflowError::NodeNotFound(id))?;
        self.edges.retain(|edge| !edge.touches(id));
        Ok(node)
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Fails if either endpoint is missing from the graph.
    pub fn add_edge(&mut self, edge: Edge) -> WorkflowResult<EdgeId> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(WorkflowError::DanglingEdge {
                node_id: edge.source,
            });
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(WorkflowError::DanglingEdge {
                node_id: edge.target,
            });
        }
        let id = edge.id;
        self.edges.push(edge);
        Ok(id)
    }

    /// Connects two nodes with a fresh edge.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> WorkflowResult<EdgeId> {
        self.add_edge(Edge::new(source, target))
    }

    /// Atomically replaces all nodes.
    ///
    /// Rejected with no mutation if the replacement contains duplicate
    /// IDs, or if it drops a node that a surviving edge still
    /// references. Callers removing nodes must submit a matching
    /// [`set_edges`](Self::set_edges) first, or use
    /// [`remove_node`](Self::remove_node) which cascades.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> WorkflowResult<()> {
        let mut ids = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !ids.insert(node.id) {
                return Err(WorkflowError::DuplicateNode(node.id));
            }
        }
        for edge in &self.edges {
            for endpoint in [edge.source, edge.target] {
                if !ids.contains(&endpoint) {
                    return Err(WorkflowError::IntegrityViolation(format!(
                        "edge {} still references dropped node {}",
                        edge.id, endpoint
                    )));
                }
            }
        }
        self.nodes = nodes.into_iter().map(|node| (node.id, node)).collect();
        Ok(())
    }

    /// Atomically replaces all edges, preserving the given order.
    ///
    /// Rejected with no mutation if any endpoint is missing.
    pub fn set_edges(&mut self, edges: Vec<Edge>) -> WorkflowResult<()> {
        for edge in &edges {
            for endpoint in [edge.source, edge.target] {
                if !self.nodes.contains_key(&endpoint) {
                    return Err(WorkflowError::DanglingEdge { node_id: endpoint });
                }
            }
        }
        self.edges = edges;
        Ok(())
    }

    /// Resets to the empty graph.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Returns a reference to a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns a mutable reference to a node.
    ///
    /// Crate-internal: external mutation goes through the update and
    /// state-transition methods so invariants hold.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Returns whether a node exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns an iterator over all nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns edges targeting a node, in insertion order.
    pub fn incoming_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.target == id)
    }

    /// Returns edges originating from a node, in insertion order.
    pub fn outgoing_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.source == id)
    }

    /// Sets a node's output artifact, marking it succeeded.
    ///
    /// This is how source nodes (uploads) are seeded: a node whose
    /// artifact arrives from outside rather than from processing.
    pub fn set_node_output(&mut self, id: NodeId, output: Artifact) -> WorkflowResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(WorkflowError::NodeNotFound(id))?;
        node.output = Some(output);
        node.state = NodeState::Succeeded;
        node.error = None;
        Ok(())
    }

    /// Explicitly resets a node back to idle, dropping its output and
    /// error.
    pub fn reset_node(&mut self, id: NodeId) -> WorkflowResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(WorkflowError::NodeNotFound(id))?;
        node.state = NodeState::Idle;
        node.output = None;
        node.error = None;
        Ok(())
    }
}
