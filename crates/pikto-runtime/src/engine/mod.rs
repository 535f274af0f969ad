//! Processing orchestration for workflow nodes.
//!
//! This module drives the per-node asynchronous state machine:
//! - [`Engine`]: validates readiness, invokes the [`Processor`], and
//!   applies results back to the graph
//! - [`EngineConfig`]: orchestration settings
//! - [`Processor`]: the external generative-media capability seam

mod config;
mod executor;
mod processor;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use executor::{Engine, Invocation};
pub use processor::{Processor, ProcessorError, ProcessorOutput, ProcessorRequest};
