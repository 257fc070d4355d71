//! Axum router wiring (HTTP -> scrape handler).
//!
//! Currently exposes a single `/metrics` route serving the text exposition
//! format; everything else falls through to the router's default 404.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus::{Encoder, TextEncoder};

use crate::app_state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(serve_metrics))
        .with_state(state)
}

async fn serve_metrics(State(state): State<AppState>) -> Response {
    tracing::debug!("handling /metrics request");

    let encoder = TextEncoder::new();
    let families = state.registry().gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buf) {
        tracing::error!(error = %e, "metrics encode failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "encode failed").into_response();
    }

    ([(header::CONTENT_TYPE, encoder.format_type().to_string())], buf).into_response()
}
