//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Supports plain text prompts and multimodal
//! (inline image) prompts.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Text generation
//! let text = client.generate_text("Summarize this bill ...").await?;
//!
//! // Vision: transcribe an image
//! let text = client
//!     .generate_with_image("image/png", &bytes, "Extract all text from this image.")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use tracing::{debug, warn};

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the generation model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, regional endpoints, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw `generateContent` call.
    pub async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!("Gemini API error: {}", error_text)));
        }

        let content_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(content_response)
    }

    /// Text generation from a single prompt.
    ///
    /// Returns the model's text, or an empty string if the model produced
    /// no candidates.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::user(vec![Part::text(prompt)]);
        Ok(self.generate(request).await?.text())
    }

    /// Multimodal generation: inline image bytes followed by a text
    /// instruction, as two parts of a single user turn.
    pub async fn generate_with_image(
        &self,
        mime_type: &str,
        bytes: &[u8],
        instruction: &str,
    ) -> Result<String> {
        let request = GenerateContentRequest::user(vec![
            Part::inline_data(mime_type, BASE64.encode(bytes)),
            Part::text(instruction),
        ]);
        Ok(self.generate(request).await?.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("test-key")
            .with_model("gemini-2.5-pro")
            .with_base_url("https://custom.api.com");

        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.model(), "gemini-2.5-pro");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }
}
