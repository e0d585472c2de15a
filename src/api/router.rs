//! API router.
//!
//! Returns a composable `Router` with every endpoint under `/api/`.
//!
//! Layers (outermost → innermost):
//! 1. `Cache-Control: no-store` → 2. CORS → 3. Access log → Handler

use std::sync::Arc;

use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the triage API router over shared state.
pub fn triage_api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: handlers use `State<ApiContext>`; `with_state` turns this into
    // `Router<()>` before the tower layers are applied.
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/send-verification", post(endpoints::verification::send))
        .route("/verify-code", post(endpoints::verification::verify))
        .route("/resend-code", post(endpoints::verification::resend))
        .route("/analyze-symptoms", post(endpoints::assessment::analyze))
        .route("/nearby-facilities", post(endpoints::facilities::nearby))
        .route("/log-assessment", post(endpoints::assessment::log))
        .with_state(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
