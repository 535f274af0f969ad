//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use pikto_runtime::prelude::*;
//! ```

pub use crate::engine::{
    Engine, EngineConfig, Invocation, Processor, ProcessorError, ProcessorOutput, ProcessorRequest,
};
pub use crate::error::{WorkflowError, WorkflowResult};
pub use crate::graph::{Edge, GraphStore, WorkflowDefinition, resolve_inputs};
pub use crate::node::{
    Artifact, EdgeId, EditNode, GenerateNode, Node, NodeData, NodeId, NodeKind, NodePatch,
    NodeState, Position, ResultNode, UploadNode,
};
pub use crate::service::WorkflowService;
