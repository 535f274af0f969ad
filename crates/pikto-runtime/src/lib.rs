#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod engine;
mod error;
pub mod graph;
pub mod node;
mod service;

#[doc(hidden)]
pub mod prelude;

pub use error::{WorkflowError, WorkflowResult};
pub use service::WorkflowService;

/// Tracing target for runtime operations.
pub const TRACING_TARGET: &str = "pikto_runtime";
