#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod processor;
mod types;

pub use client::GeminiClient;
pub use config::{GeminiConfig, GeminiConfigBuilder};
pub use error::{GeminiError, GeminiResult};

/// Tracing target for Gemini backend operations.
pub const TRACING_TARGET: &str = "pikto_gemini";
