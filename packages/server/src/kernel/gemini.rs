//! Gemini-backed implementation of the analyzer trait.

use async_trait::async_trait;
use gemini_client::GeminiClient;
use serde_json::Value;
use tracing::debug;

use crate::kernel::analyzer::{parse_fields_response, AnalyzerError, BillAnalyzer};
use crate::kernel::prompts::{EXTRACT_FIELDS_PROMPT, INSIGHTS_PROMPT, TRANSCRIBE_IMAGE_PROMPT};

/// Bill analyzer backed by the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: GeminiClient,
}

impl GeminiAnalyzer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BillAnalyzer for GeminiAnalyzer {
    async fn transcribe_image(
        &self,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<String, AnalyzerError> {
        self.client
            .generate_with_image(mime_type, bytes, TRANSCRIBE_IMAGE_PROMPT)
            .await
            .map_err(|e| AnalyzerError::Client(Box::new(e)))
    }

    async fn extract_fields(&self, raw_text: &str) -> Result<Value, AnalyzerError> {
        let prompt = EXTRACT_FIELDS_PROMPT.replace("{text}", raw_text);
        let response = self
            .client
            .generate_text(&prompt)
            .await
            .map_err(|e| AnalyzerError::Client(Box::new(e)))?;

        debug!(response_len = response.len(), "field extraction response");
        parse_fields_response(&response)
    }

    async fn usage_insights(&self, usage_lines: &[String]) -> Result<String, AnalyzerError> {
        let prompt = INSIGHTS_PROMPT.replace("{usage}", &usage_lines.join("\n"));
        self.client
            .generate_text(&prompt)
            .await
            .map_err(|e| AnalyzerError::Client(Box::new(e)))
    }
}
