//! Bill domain: persisted records, emission arithmetic and the ingestion
//! pipeline.

pub mod emissions;
pub mod models;
pub mod pipeline;

pub use models::{Bill, EmissionRow, ExtractedFields};
pub use pipeline::{process_bill, PipelineError, ProcessedBill};
