// CarbonWise - API Core
//
// This crate provides the backend API for utility-bill ingestion: uploads are
// run through text and structured-field extraction, per-bill carbon emissions
// are computed and persisted, and read endpoints aggregate the stored records.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
