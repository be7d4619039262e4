//! PDF text extraction.

use thiserror::Error;
use tracing::warn;

/// PDF text extraction failure.
#[derive(Debug, Error)]
#[error("PDF extraction failed: {0}")]
pub struct PdfError(pub String);

/// Pull the text layer out of a PDF.
///
/// pdf-extract is synchronous and CPU-bound, so the work runs on the
/// blocking pool. A document with no text layer yields an empty string;
/// scanned or corrupt documents surface an error.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, PdfError> {
    tokio::task::spawn_blocking(move || {
        match pdf_extract::extract_text_from_mem(&bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(error = %e, "pdf-extract failed; may be scanned or corrupted");
                Err(PdfError(e.to_string()))
            }
        }
    })
    .await
    .map_err(|e| PdfError(format!("extraction task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_pdf_bytes_are_an_error() {
        let result = extract_text(b"this is not a pdf".to_vec()).await;
        assert!(result.is_err());
    }
}
