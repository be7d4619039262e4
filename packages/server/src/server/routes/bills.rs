//! Bill upload and emissions read endpoints.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::domains::bills::emissions::{summarize, usage_lines, EmissionsSummary};
use crate::domains::bills::{process_bill, Bill};
use crate::server::app::{AppState, MAX_UPLOAD_BYTES};
use crate::server::error::ApiError;

/// Media types accepted at the upload boundary.
const ALLOWED_TYPES: [&str; 4] = [
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/jpg",
];

/// One file pulled out of the multipart stream.
struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Find the `bill` field in the multipart stream. Other fields are
/// ignored, not rejected.
async fn read_bill_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(e.to_string()))?
    {
        if field.name() != Some("bill") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("bill").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadUpload(e.to_string()))?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

/// POST /upload-bill
///
/// Accepts a single `bill` multipart file field, runs the extraction
/// pipeline, persists the bill and echoes the structured fields with the
/// computed emission merged in.
pub async fn upload_bill_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let Some(file) = read_bill_field(&mut multipart).await? else {
        return Err(ApiError::MissingFile);
    };

    // Upload-boundary checks run before any extraction work.
    if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
        return Err(ApiError::UnsupportedMediaType);
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::PayloadTooLarge);
    }

    let outcome = process_bill(state.analyzer.as_ref(), &file.content_type, &file.bytes).await?;

    let bill = Bill::new(
        file.file_name,
        file.content_type,
        file.bytes,
        outcome.extracted.clone(),
        outcome.carbon_emitted.clone(),
        outcome.needs_review,
    );
    // No rollback: extraction already happened and is simply lost if the
    // insert fails.
    bill.insert(&state.db_pool)
        .await
        .map_err(|e| ApiError::internal("Failed to process bill", e))?;

    let mut data = match outcome.extracted {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    data.insert(
        "carbonEmitted".to_string(),
        Value::String(outcome.carbon_emitted),
    );

    Ok(Json(json!({
        "success": true,
        "message": "Bill processed successfully",
        "data": data,
    })))
}

/// GET /emissions-summary
///
/// Folds every stored bill into a grand total and per-month sums. Reads
/// the entire record set on each call; there is no pagination.
pub async fn emissions_summary_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<EmissionsSummary>, ApiError> {
    let rows = Bill::emission_rows(&state.db_pool)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch summary", e))?;

    Ok(Json(summarize(&rows)))
}

/// GET /carbon-insights
///
/// Sends the five most recent bills through the model for short insights.
/// Every call re-invokes the model; nothing is cached.
pub async fn carbon_insights_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let rows = Bill::recent_emission_rows(&state.db_pool, 5)
        .await
        .map_err(|e| ApiError::internal("Failed to generate insights", e))?;

    let insights = state
        .analyzer
        .usage_insights(&usage_lines(&rows))
        .await
        .map_err(|e| ApiError::internal("Failed to generate insights", e))?;

    Ok(Json(json!({ "insights": insights })))
}

/// POST /fetch-bill
///
/// Reserved: bill lookup by consumer number is not implemented yet.
pub async fn fetch_bill_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "Not implemented" })),
    )
}
