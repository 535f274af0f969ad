//! Workflow graph structures.
//!
//! This module provides the authoritative graph state:
//! - [`GraphStore`]: The in-memory owner of all nodes and edges
//! - [`Edge`]: Directed connections between nodes
//! - [`WorkflowDefinition`]: Serializable snapshot of a graph (JSON-friendly)
//! - [`resolve_inputs`]: Derives a node's upstream artifacts from the graph

mod definition;
mod edge;
mod resolve;
mod store;

pub use definition::WorkflowDefinition;
pub use edge::Edge;
pub use resolve::resolve_inputs;
pub use store::GraphStore;
