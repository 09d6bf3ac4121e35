//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{handlers, models::{AnalyzeRequest, ApiError}};
use crate::error::TactiCoreError;
use crate::events::EventStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
}

/// Build the router with all routes and middleware
pub fn router(store: Arc<EventStore>) -> Router {
    let app_state = AppState { store };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/matches", get(list_matches_handler))
        .route("/api/matches/:id/events", get(match_events_handler))
        .route("/api/matches/:id/patterns", get(match_patterns_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Configure and start the HTTP server
pub async fn start_http_server(store: Arc<EventStore>, address: &str) -> Result<()> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("🌐 API server listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(error: TactiCoreError) -> Response {
    let status = match error {
        TactiCoreError::MatchNotFound(_) => StatusCode::NOT_FOUND,
        TactiCoreError::InvalidClip(_) | TactiCoreError::Config(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError::new(error.to_string()))).into_response()
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check()))
}

/// List matches handler
async fn list_matches_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::list_matches(&state.store)))
}

/// Match timeline handler
async fn match_events_handler(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match handlers::match_events(&state.store, id) {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Match pattern summary handler
async fn match_patterns_handler(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match handlers::match_patterns(&state.store, id) {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Event analysis handler
async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    match handlers::analyze_event(&state.store, payload) {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(e),
    }
}
