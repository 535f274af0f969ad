//! `Processor` implementation for the Gemini backend.

use pikto_runtime::engine::{Processor, ProcessorError, ProcessorOutput, ProcessorRequest};

use crate::TRACING_TARGET;
use crate::client::GeminiClient;

#[async_trait::async_trait]
impl Processor for GeminiClient {
    async fn process(&self, request: ProcessorRequest) -> Result<ProcessorOutput, ProcessorError> {
        let kind = request.kind();
        let result = match request {
            ProcessorRequest::Generate { prompt } => self.generate(&prompt).await,
            ProcessorRequest::Edit { inputs, prompt } => self.edit(&inputs, &prompt).await,
        };

        result.map_err(|error| {
            tracing::warn!(
                target: TRACING_TARGET,
                kind,
                %error,
                "Gemini request failed"
            );
            error.into()
        })
    }
}
