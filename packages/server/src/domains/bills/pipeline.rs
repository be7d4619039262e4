//! The bill ingestion pipeline: text extraction, structured-field
//! extraction and the emission computation.
//!
//! Persistence is the caller's final step, so the pipeline itself stays
//! store-free and runs against any `BillAnalyzer` implementation.

use serde_json::Value;
use thiserror::Error;

use crate::domains::bills::emissions::calc_carbon;
use crate::domains::bills::models::ExtractedFields;
use crate::kernel::{pdf, AnalyzerError, BillAnalyzer};

/// Pipeline failure. Each step is a hard dependency on the previous one
/// succeeding; the first failure terminates the request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Text extraction from the document failed
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// The AI analyzer failed (transcription, empty reply, bad JSON)
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

/// What ingestion produced for one upload, ready to persist and echo back.
#[derive(Debug, Clone)]
pub struct ProcessedBill {
    /// Model output, passed through unvalidated.
    pub extracted: Value,
    /// Fixed-point kg CO2 string computed from unitsConsumed.
    pub carbon_emitted: String,
    /// True when unitsConsumed was missing or non-numeric and the emission
    /// defaulted to zero.
    pub needs_review: bool,
}

/// Run the extraction pipeline over one validated upload.
///
/// The upload boundary has already enforced the media-type allowlist and
/// the size cap; anything that reaches here is a PDF or a supported image.
pub async fn process_bill(
    analyzer: &dyn BillAnalyzer,
    file_type: &str,
    bytes: &[u8],
) -> Result<ProcessedBill, PipelineError> {
    // Raw text: from the PDF text layer, or from vision transcription.
    // A text-free PDF legitimately yields an empty string and still goes
    // through field extraction.
    let raw_text = if file_type == "application/pdf" {
        pdf::extract_text(bytes.to_vec())
            .await
            .map_err(|e| PipelineError::Extraction(e.to_string()))?
    } else {
        analyzer.transcribe_image(file_type, bytes).await?
    };

    let extracted = analyzer.extract_fields(&raw_text).await?;

    let units = ExtractedFields(&extracted).units_consumed();
    let needs_review = units.is_none();
    if needs_review {
        tracing::warn!("unitsConsumed missing or non-numeric; emission recorded as 0.00");
    }
    let carbon_emitted = calc_carbon(units.unwrap_or(0.0));

    Ok(ProcessedBill {
        extracted,
        carbon_emitted,
        needs_review,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAnalyzer;

    #[tokio::test]
    async fn test_image_upload_round_trip() {
        let mock = MockAnalyzer::new()
            .with_transcript("Units Consumed: 250")
            .with_fields_response(r#"{"billingMonth": "Jan", "unitsConsumed": 250}"#);

        let result = process_bill(&mock, "image/png", b"fake-png")
            .await
            .unwrap();

        assert_eq!(result.carbon_emitted, "205.00");
        assert!(!result.needs_review);
        assert_eq!(result.extracted["billingMonth"], "Jan");
        assert_eq!(mock.transcribe_call_count(), 1);
        // The transcript is what field extraction receives.
        assert_eq!(mock.extract_calls(), vec!["Units Consumed: 250"]);
    }

    #[tokio::test]
    async fn test_empty_extracted_text_still_reaches_field_extraction() {
        // A text-free document transcribes to "", which is a legitimate
        // field-extraction input, not a failure.
        let mock = MockAnalyzer::new()
            .with_transcript("")
            .with_fields_response(r#"{"unitsConsumed": 10}"#);

        let result = process_bill(&mock, "image/png", b"png").await.unwrap();

        assert_eq!(mock.extract_calls(), vec![""]);
        assert_eq!(result.carbon_emitted, "8.20");
    }

    #[tokio::test]
    async fn test_fenced_response_parses_like_bare_json() {
        let mock = MockAnalyzer::new()
            .with_transcript("text")
            .with_fields_response("```json\n{\"unitsConsumed\": 100}\n```");

        let result = process_bill(&mock, "image/jpeg", b"jpg").await.unwrap();

        assert_eq!(result.carbon_emitted, "82.00");
    }

    #[tokio::test]
    async fn test_units_as_numeric_string() {
        let mock = MockAnalyzer::new()
            .with_transcript("text")
            .with_fields_response(r#"{"unitsConsumed": "100"}"#);

        let result = process_bill(&mock, "image/jpeg", b"jpg").await.unwrap();

        assert_eq!(result.carbon_emitted, "82.00");
        assert!(!result.needs_review);
    }

    #[tokio::test]
    async fn test_missing_units_defaults_to_zero_and_flags_review() {
        let mock = MockAnalyzer::new()
            .with_transcript("text")
            .with_fields_response(r#"{"billingMonth": "Feb"}"#);

        let result = process_bill(&mock, "image/png", b"png").await.unwrap();

        assert_eq!(result.carbon_emitted, "0.00");
        assert!(result.needs_review);
    }

    #[tokio::test]
    async fn test_empty_model_reply_is_an_error_not_an_empty_object() {
        let mock = MockAnalyzer::new()
            .with_transcript("text")
            .with_fields_response("   \n  ");

        let err = process_bill(&mock, "image/png", b"png").await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Analyzer(AnalyzerError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_reply_is_an_error() {
        let mock = MockAnalyzer::new()
            .with_transcript("text")
            .with_fields_response("sorry, I can't help with that");

        let err = process_bill(&mock, "image/png", b"png").await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Analyzer(AnalyzerError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_an_extraction_failure() {
        let mock = MockAnalyzer::new().with_fields_response(r#"{}"#);

        let err = process_bill(&mock, "application/pdf", b"not a pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Extraction(_)));
        // The pipeline never reached the analyzer.
        assert_eq!(mock.extract_call_count(), 0);
    }
}
