//! Kernel module - infrastructure seams behind the bill pipeline.

pub mod analyzer;
pub mod gemini;
pub mod mock;
pub mod pdf;
pub mod prompts;

pub use analyzer::{parse_fields_response, AnalyzerError, BillAnalyzer};
pub use gemini::GeminiAnalyzer;
pub use mock::MockAnalyzer;

// Re-export the AI client
pub use gemini_client::GeminiClient;
