//! Workflow error types.

use thiserror::Error;

use crate::node::{NodeId, NodeKind};

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors that can occur during workflow operations.
///
/// All errors are node-local: a failed or rejected operation never
/// invalidates artifacts already produced elsewhere in the graph.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A node with this ID already exists in the graph.
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    /// The referenced node does not exist.
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    /// An edge references a node that is not in the graph.
    #[error("edge endpoint {node_id} does not exist")]
    DanglingEdge {
        /// The missing endpoint.
        node_id: NodeId,
    },

    /// A bulk replace would leave the graph inconsistent.
    #[error("bulk replace rejected: {0}")]
    IntegrityViolation(String),

    /// Node configuration or inputs are invalid for invocation.
    #[error("invalid config for node {node_id}: {message}")]
    InvalidNodeConfig {
        /// ID of the node with invalid config.
        node_id: NodeId,
        /// Error message.
        message: String,
    },

    /// The node kind does not support processing.
    #[error("node {node_id} of kind {kind} is not invocable")]
    NotInvocable {
        /// ID of the node.
        node_id: NodeId,
        /// Kind of the node.
        kind: NodeKind,
    },

    /// Processing failed for a node.
    #[error("node {node_id} failed: {message}")]
    NodeFailed {
        /// ID of the failed node.
        node_id: NodeId,
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
