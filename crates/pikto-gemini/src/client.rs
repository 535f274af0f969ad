//! Gemini API client.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::DeserializeOwned;
use serde::Serialize;

use pikto_runtime::engine::ProcessorOutput;
use pikto_runtime::node::Artifact;

use crate::TRACING_TARGET;
use crate::config::GeminiConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, ImageInstance, ImageParameters,
    Part, PredictRequest, PredictResponse,
};

/// MIME types the Gemini models accept as inline media.
const SUPPORTED_MIME_TYPES: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Client for the Gemini generative-media API.
///
/// Text-to-image generation goes through the Imagen `:predict`
/// endpoint; multi-image editing goes through `:generateContent` with
/// the reference images attached as inline media parts.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Creates a new client from a configuration.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Creates a new client with default configuration for an API key.
    pub fn from_api_key(api_key: impl Into<String>) -> GeminiResult<Self> {
        Self::new(GeminiConfig::new(api_key))
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Generates one image from a text prompt.
    pub async fn generate(&self, prompt: &str) -> GeminiResult<ProcessorOutput> {
        let request = PredictRequest {
            instances: vec![ImageInstance {
                prompt: prompt.to_string(),
            }],
            parameters: ImageParameters {
                sample_count: 1,
                output_mime_type: "image/jpeg".to_string(),
                aspect_ratio: "1:1".to_string(),
            },
        };

        tracing::debug!(
            target: TRACING_TARGET,
            model = %self.config.generate_model,
            "Requesting image generation"
        );

        let response: PredictResponse = self
            .post(&self.config.generate_model, "predict", &request)
            .await?;

        let prediction = response.predictions.first().ok_or(GeminiError::NoImage)?;
        let data = prediction
            .bytes_base64_encoded
            .as_deref()
            .ok_or(GeminiError::NoImage)?;
        let payload = BASE64
            .decode(data)
            .map_err(|e| GeminiError::InvalidResponse(format!("bad base64 payload: {}", e)))?;
        let mime_type = prediction.mime_type.as_deref().unwrap_or("image/jpeg");

        let mut output = ProcessorOutput::new(Artifact::new(mime_type, payload));
        if let Some(enhanced) = &prediction.enhanced_prompt {
            output = output.with_description(enhanced.clone());
        }
        Ok(output)
    }

    /// Edits/combines reference images according to a text prompt.
    ///
    /// Inputs with MIME types the model does not accept are skipped,
    /// matching the lenient handling of the canvas layer.
    pub async fn edit(&self, inputs: &[Artifact], prompt: &str) -> GeminiResult<ProcessorOutput> {
        let mut parts = vec![Part::text(prompt)];
        for input in inputs {
            if !SUPPORTED_MIME_TYPES.contains(&input.mime_type.as_str()) {
                tracing::debug!(
                    target: TRACING_TARGET,
                    mime_type = %input.mime_type,
                    "Skipping input with unsupported mime type"
                );
                continue;
            }
            parts.push(Part::inline_data(
                input.mime_type.clone(),
                BASE64.encode(&input.payload),
            ));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            model = %self.config.edit_model,
            input_count = parts.len() - 1,
            "Requesting image edit"
        );

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
        };
        let response: GenerateContentResponse = self
            .post(&self.config.edit_model, "generateContent", &request)
            .await?;

        let blob = response.first_inline_data().ok_or(GeminiError::NoImage)?;
        let payload = BASE64
            .decode(&blob.data)
            .map_err(|e| GeminiError::InvalidResponse(format!("bad base64 payload: {}", e)))?;
        let artifact = Artifact::new(blob.mime_type.clone(), payload);

        let mut output = ProcessorOutput::new(artifact);
        if let Some(text) = response.text() {
            output = output.with_description(text);
        }
        Ok(output)
    }

    /// Posts a JSON request to `models/{model}:{action}`.
    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        model: &str,
        action: &str,
        request: &Req,
    ) -> GeminiResult<Resp> {
        let endpoint = format!(
            "{}/v1beta/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            action
        );

        let response = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Returns whether a MIME type is accepted as inline media.
    pub fn supports_mime_type(mime_type: &str) -> bool {
        SUPPORTED_MIME_TYPES.contains(&mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_mime_types() {
        assert!(GeminiClient::supports_mime_type("image/png"));
        assert!(GeminiClient::supports_mime_type("image/webp"));
        assert!(!GeminiClient::supports_mime_type("image/gif"));
        assert!(!GeminiClient::supports_mime_type("application/pdf"));
    }

    #[test]
    fn test_client_from_api_key() {
        let client = GeminiClient::from_api_key("key").unwrap();
        assert_eq!(client.config().generate_model, "imagen-3.0-generate-002");
    }
}
