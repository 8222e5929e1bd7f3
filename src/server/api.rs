//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::core::errors::TranslationError;
use crate::core::gateway::TranslationGateway;
use crate::core::models::TranslationRequest;

/// Liveness text served on `GET /`
pub const LIVENESS_TEXT: &str = "Translation API is running";

/// Application state
#[derive(Clone, Debug)]
pub struct AppState {
    gateway: Arc<TranslationGateway>,
}

impl AppState {
    /// Wrap a gateway for sharing across handlers
    pub fn new(gateway: TranslationGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Caller-facing message
    pub error: String,
}

/// Caller-facing error: a status code plus the fixed message, nothing else
pub struct ApiError(TranslationError);

impl From<TranslationError> for ApiError {
    fn from(err: TranslationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TranslationError::InvalidRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Health check handler
async fn health_check() -> &'static str {
    LIVENESS_TEXT
}

/// Unreadable bodies are reported like missing fields
fn parse_body(
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<TranslationRequest, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection);
            Err(TranslationError::InvalidRequest.into())
        }
    }
}

/// Translation handler with fallback
async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_body(payload)?;

    match state.gateway.translate(&request).await {
        Ok(result) => {
            debug!("Translated via {} provider", result.provider);
            Ok(Json(result))
        }
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Single-provider translation handler, no fallback
async fn translate_gemini(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = parse_body(payload)?;

    match state.gateway.translate_with_primary(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            warn!("Primary-only translation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .route("/translate/gemini", post(translate_gemini))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
///
/// The gateway is built from an already validated config (see `cli::commands::load_config`).
pub async fn run_server(
    gateway: TranslationGateway,
    host: String,
    port: u16,
) -> anyhow::Result<()> {
    info!("Provider chain: {}", gateway.provider_names().join(" -> "));

    let app = router(AppState::new(gateway));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
