//! Mock analyzer for testing.
//!
//! Provides a configurable mock implementation of the `BillAnalyzer` trait
//! with canned responses and call recording, so pipeline tests never touch
//! the network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::kernel::analyzer::{parse_fields_response, AnalyzerError, BillAnalyzer};

/// Mock analyzer with canned responses.
///
/// The field-extraction reply is configured as *raw model text* and goes
/// through the same empty-check / fence-stripping / JSON parsing as the
/// live analyzer, so error paths can be exercised too.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockAnalyzer::new()
///     .with_transcript("Units Consumed: 250")
///     .with_fields_response(r#"{"unitsConsumed": 250}"#);
/// ```
#[derive(Default, Clone)]
pub struct MockAnalyzer {
    transcript: Option<String>,
    fields_response: Option<String>,
    insights: Option<String>,
    /// Mime types passed to transcribe_image
    transcribe_calls: Arc<Mutex<Vec<String>>>,
    /// Raw texts passed to extract_fields
    extract_calls: Arc<Mutex<Vec<String>>>,
    /// Usage lines passed to usage_insights
    insight_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockAnalyzer {
    /// Create a new empty mock analyzer.
    ///
    /// With no canned field response configured, `extract_fields` behaves
    /// as if the model returned nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned image transcript (builder pattern).
    pub fn with_transcript(mut self, text: impl Into<String>) -> Self {
        self.transcript = Some(text.into());
        self
    }

    /// Canned raw model text for field extraction (builder pattern).
    pub fn with_fields_response(mut self, raw: impl Into<String>) -> Self {
        self.fields_response = Some(raw.into());
        self
    }

    /// Canned insights text (builder pattern).
    pub fn with_insights(mut self, text: impl Into<String>) -> Self {
        self.insights = Some(text.into());
        self
    }

    /// Number of times transcribe_image was called.
    pub fn transcribe_call_count(&self) -> usize {
        self.transcribe_calls.lock().unwrap().len()
    }

    /// Number of times extract_fields was called.
    pub fn extract_call_count(&self) -> usize {
        self.extract_calls.lock().unwrap().len()
    }

    /// The raw texts that were passed to extract_fields.
    pub fn extract_calls(&self) -> Vec<String> {
        self.extract_calls.lock().unwrap().clone()
    }

    /// The usage-line batches that were passed to usage_insights.
    pub fn insight_calls(&self) -> Vec<Vec<String>> {
        self.insight_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BillAnalyzer for MockAnalyzer {
    async fn transcribe_image(
        &self,
        mime_type: &str,
        _bytes: &[u8],
    ) -> Result<String, AnalyzerError> {
        self.transcribe_calls
            .lock()
            .unwrap()
            .push(mime_type.to_string());
        Ok(self.transcript.clone().unwrap_or_default())
    }

    async fn extract_fields(&self, raw_text: &str) -> Result<Value, AnalyzerError> {
        self.extract_calls.lock().unwrap().push(raw_text.to_string());
        let raw = self.fields_response.clone().unwrap_or_default();
        parse_fields_response(&raw)
    }

    async fn usage_insights(&self, usage_lines: &[String]) -> Result<String, AnalyzerError> {
        self.insight_calls.lock().unwrap().push(usage_lines.to_vec());
        Ok(self
            .insights
            .clone()
            .unwrap_or_else(|| "No insights available.".to_string()))
    }
}
