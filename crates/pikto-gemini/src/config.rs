//! Gemini client configuration.

use std::time::Duration;

use derive_builder::Builder;

/// Default values for configuration options.
mod defaults {
    use std::time::Duration;

    /// Gemini API base URL.
    pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";

    /// Model used for text-to-image generation.
    pub const GENERATE_MODEL: &str = "imagen-3.0-generate-002";

    /// Model used for multi-image editing.
    pub const EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";

    /// Default request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GeminiConfig {
    /// API key for the Gemini API.
    pub api_key: String,

    /// Base URL of the API.
    #[builder(default = "defaults::BASE_URL.to_string()")]
    pub base_url: String,

    /// Model used for text-to-image generation.
    #[builder(default = "defaults::GENERATE_MODEL.to_string()")]
    pub generate_model: String,

    /// Model used for multi-image editing.
    #[builder(default = "defaults::EDIT_MODEL.to_string()")]
    pub edit_model: String,

    /// Request timeout.
    #[builder(default = "defaults::REQUEST_TIMEOUT")]
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Creates a configuration with default settings for an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::BASE_URL.to_string(),
            generate_model: defaults::GENERATE_MODEL.to_string(),
            edit_model: defaults::EDIT_MODEL.to_string(),
            request_timeout: defaults::REQUEST_TIMEOUT,
        }
    }

    /// Returns a builder for custom configuration.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

impl GeminiConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(api_key) = &self.api_key {
            if api_key.trim().is_empty() {
                return Err("api_key must not be empty".into());
            }
        }
        if let Some(base_url) = &self.base_url {
            if url::Url::parse(base_url).is_err() {
                return Err(format!("base_url is not a valid URL: {}", base_url));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = GeminiConfig::builder().api_key("key").build().unwrap();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.generate_model, "imagen-3.0-generate-002");
        assert_eq!(config.edit_model, "gemini-2.5-flash-image-preview");
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        assert!(GeminiConfig::builder().api_key("  ").build().is_err());
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = GeminiConfig::builder()
            .api_key("key")
            .base_url("not a url")
            .build();
        assert!(result.is_err());
    }
}
