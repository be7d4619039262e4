//! Reserved record shapes kept for storage compatibility.
//!
//! These mirror sibling document types from the wider deployment (invoice
//! extraction, LPG refills, raw PDF uploads). No endpoint in this service
//! reads or writes them yet; the tables exist so those ingest paths can
//! land without a schema change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured fields pulled from a vendor invoice.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExtractedInvoice {
    pub id: Uuid,
    /// Soft reference to pdf_documents; not enforced as a foreign key.
    pub pdf_document_id: Option<Uuid>,
    pub file_name: String,
    pub vendor_name: Option<String>,
    pub vendor_address: Option<String>,
    pub vendor_tax_id: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub currency: Option<String>,
    pub subtotal: Option<f64>,
    pub tax_percent: Option<f64>,
    pub total: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One LPG consumption entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LpgRecord {
    pub id: Uuid,
    /// Multi-tenant hook; unused by the current endpoints.
    pub user_id: String,
    pub consumer_number: Option<String>,
    pub provider: Option<String>,
    pub connection_type: Option<String>,
    pub subsidy_status: Option<String>,
    pub cylinders_consumed: Option<f64>,
    pub lpg_in_kg: Option<f64>,
    pub carbon_emitted: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A raw uploaded PDF blob.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PdfDocument {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub file_data: Vec<u8>,
    pub uploaded_at: DateTime<Utc>,
}
