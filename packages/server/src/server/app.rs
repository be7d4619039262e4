//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::BillAnalyzer;
use crate::server::routes::{
    carbon_insights_handler, emissions_summary_handler, fetch_bill_handler, health_handler,
    upload_bill_handler,
};

/// Maximum accepted upload size (25 MiB), enforced per file in the upload
/// route.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub analyzer: Arc<dyn BillAnalyzer>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, analyzer: Arc<dyn BillAnalyzer>) -> Router {
    let app_state = AppState {
        db_pool: pool,
        analyzer,
    };

    // CORS configuration - the upload API is public, allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/upload-bill", post(upload_bill_handler))
        .route("/emissions-summary", get(emissions_summary_handler))
        .route("/carbon-insights", get(carbon_insights_handler))
        .route("/fetch-bill", post(fetch_bill_handler))
        // Health check
        .route("/health", get(health_handler))
        // The per-file cap is 25 MiB; the body limit leaves headroom for
        // multipart framing so the route-level check is what rejects the
        // file.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
