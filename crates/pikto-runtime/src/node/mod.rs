//! Node types for workflow graphs.
//!
//! This module provides the core node abstractions:
//! - [`NodeId`] / [`EdgeId`]: Unique identifiers
//! - [`NodeData`]: Kind-specific configuration (Upload, Edit, Generate, Result)
//! - [`Node`]: A node with position, processing state, and optional output
//! - [`Artifact`]: An opaque encoded media blob
//! - [`NodePatch`]: Shallow-merge update carrier for [`GraphStore::update_node`]
//!
//! [`GraphStore::update_node`]: crate::graph::GraphStore::update_node

mod artifact;
mod data;
mod id;
mod patch;
mod position;

pub use artifact::Artifact;
pub use data::{EditNode, GenerateNode, Node, NodeData, NodeKind, NodeState, ResultNode, UploadNode};
pub use id::{EdgeId, NodeId};
pub use patch::NodePatch;
pub use position::Position;
