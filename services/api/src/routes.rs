use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, get_service};
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use vise::cards::{card_router, CardService, ClientRegistry, EventSink};

/// Full application: card routes, probes, static frontend, and per-request tracing.
pub(crate) fn build_app<R, E>(
    service: Arc<CardService<R, E>>,
    state: AppState,
    frontend_dir: &Path,
) -> axum::Router
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    with_card_routes(service, frontend_dir)
        .layer(Extension(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// `/` serves the frontend's `index.html` when present, otherwise the JSON service index.
pub(crate) fn with_card_routes<R, E>(
    service: Arc<CardService<R, E>>,
    frontend_dir: &Path,
) -> axum::Router
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    let index_html = frontend_dir.join("index.html");
    let root = if index_html.is_file() {
        get_service(ServeFile::new(index_html))
    } else {
        get(service_index)
    };

    card_router(service)
        .route("/", root)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback_service(ServeDir::new(frontend_dir))
}

pub(crate) async fn service_index() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "VISE API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "endpoints": [
            "POST /client - register a client",
            "POST /purchase - process a purchase",
            "GET /clients - list clients",
            "GET /health - health check",
        ],
    }))
}

pub(crate) async fn healthcheck(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "uptimeSeconds": state.started_at.elapsed().as_secs_f64(),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
