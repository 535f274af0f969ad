//! The external generative-media capability seam.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::Artifact;

/// A request to the external generative-media capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessorRequest {
    /// Text-to-image generation.
    Generate {
        /// Generation prompt.
        prompt: String,
    },
    /// Multi-image edit: N images + text -> 1 image.
    Edit {
        /// Upstream artifacts, in resolution order.
        inputs: Vec<Artifact>,
        /// Editing prompt.
        prompt: String,
    },
}

impl ProcessorRequest {
    /// Returns the prompt text of the request.
    pub fn prompt(&self) -> &str {
        match self {
            Self::Generate { prompt } | Self::Edit { prompt, .. } => prompt,
        }
    }

    /// Returns the request kind as a string.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Edit { .. } => "edit",
        }
    }
}

/// A successful processing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorOutput {
    /// The produced media artifact.
    pub artifact: Artifact,
    /// Optional backend-provided description of the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProcessorOutput {
    /// Creates a new output without a description.
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A rejection from the external capability.
///
/// Processor failures are node-local: the failing node records the
/// message, and nothing else in the graph is affected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ProcessorError {
    /// Human-readable failure message.
    pub message: String,
}

impl ProcessorError {
    /// Creates a new processor error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The external capability that performs image generation and editing.
///
/// Implementations talk to a generative-media backend; the engine only
/// depends on this contract. Wiring (credentials, endpoints) is a
/// constructor-time concern of the implementation, never polled by the
/// engine.
#[async_trait::async_trait]
pub trait Processor: Send + Sync {
    /// Performs the requested generation or edit.
    async fn process(&self, request: ProcessorRequest) -> Result<ProcessorOutput, ProcessorError>;
}
