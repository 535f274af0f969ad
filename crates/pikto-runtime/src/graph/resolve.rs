//! Input resolution: deriving a node's upstream artifacts.

use super::store::GraphStore;
use crate::node::{Artifact, NodeId};

/// Resolves the ordered list of upstream output artifacts feeding a
/// node.
///
/// Edges targeting the node are scanned in the order they appear in
/// the graph's edge collection (insertion order). For each edge, the
/// source node's output is included if defined; an upstream node that
/// has not yet produced output contributes nothing and is not an
/// error. Duplicate sources are not deduplicated: two edges from the
/// same source yield its artifact twice.
///
/// An empty list is a valid, expected state for a node with no
/// qualifying edges.
pub fn resolve_inputs(store: &GraphStore, node_id: NodeId) -> Vec<Artifact> {
    store
        .incoming_edges(node_id)
        .filter_map(|edge| store.node(edge.source))
        .filter_map(|source| source.output.clone())
        .collect()
}
