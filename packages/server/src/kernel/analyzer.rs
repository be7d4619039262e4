//! AI analyzer trait for bill understanding.
//!
//! Abstracts the generative-AI operations the ingestion pipeline needs so
//! callers can swap in a mock instead of a live Gemini call. Unit tests
//! must never hard-wire a network request into the pipeline.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from the analyzer seam.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Model returned empty or whitespace-only text where JSON was expected
    #[error("AI returned no JSON text")]
    EmptyResponse,

    /// Model text did not parse as JSON
    #[error("AI returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Underlying client or network failure
    #[error("AI request failed: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Generative-AI operations behind the bill pipeline.
#[async_trait]
pub trait BillAnalyzer: Send + Sync {
    /// Transcribe all visible text from an uploaded bill image.
    async fn transcribe_image(&self, mime_type: &str, bytes: &[u8])
        -> Result<String, AnalyzerError>;

    /// Turn raw bill text into the fixed-shape JSON object.
    ///
    /// Implementations reject empty model output and strip Markdown code
    /// fences before parsing; the parsed value passes through without any
    /// schema validation.
    async fn extract_fields(&self, raw_text: &str) -> Result<Value, AnalyzerError>;

    /// Short natural-language insights over recent usage lines.
    async fn usage_insights(&self, usage_lines: &[String]) -> Result<String, AnalyzerError>;
}

/// Parse a field-extraction reply from the model.
///
/// Empty or whitespace-only output is rejected rather than treated as an
/// empty object. Models often wrap JSON in ```json fences; the markers are
/// stripped wherever they appear before parsing.
pub fn parse_fields_response(raw: &str) -> Result<Value, AnalyzerError> {
    if raw.trim().is_empty() {
        return Err(AnalyzerError::EmptyResponse);
    }
    let cleaned = raw.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim()).map_err(AnalyzerError::InvalidJson)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_json() {
        let value = parse_fields_response(r#"{"unitsConsumed": 100}"#).unwrap();
        assert_eq!(value["unitsConsumed"], 100);
    }

    #[test]
    fn test_strips_code_fences() {
        let fenced = "```json\n{\"unitsConsumed\":100}\n```";
        let bare = "{\"unitsConsumed\":100}";
        assert_eq!(
            parse_fields_response(fenced).unwrap(),
            parse_fields_response(bare).unwrap()
        );
    }

    #[test]
    fn test_rejects_whitespace_only_response() {
        assert!(matches!(
            parse_fields_response("   \n\t  "),
            Err(AnalyzerError::EmptyResponse)
        ));
    }

    #[test]
    fn test_rejects_non_json_response() {
        assert!(matches!(
            parse_fields_response("I could not read the bill."),
            Err(AnalyzerError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let value =
            parse_fields_response(r#"{"unitsConsumed": 1, "somethingElse": "kept"}"#).unwrap();
        assert_eq!(value["somethingElse"], "kept");
    }
}
