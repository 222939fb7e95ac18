use crate::config::Config;
use crate::models::{FailureKind, LookupOutcome, LookupQuery, LookupRequest};
use crate::services::{lookup_ip_address, BlacklistService};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the upstream blacklist API.
    pub service: BlacklistService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let service = BlacklistService::new(&config);
        Self { config, service }
    }
}

/// Build the HTTP router with its middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/lookup", get(lookup_get).post(lookup_post))
        .with_state(state)
        // Lookup bodies are a single address
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
///
/// Returns the service status, version, and whether the upstream key is set.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-ip-blacklist-api",
            "version": env!("CARGO_PKG_VERSION"),
            "upstreamConfigured": state.config.has_api_key()
        })),
    )
}

/// GET /api/v1/lookup?ip=<address>
///
/// A missing `ip` parameter is looked up as the empty string and so reported
/// as a validation failure.
pub async fn lookup_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupQuery>,
) -> LookupOutcome {
    let raw = params.ip.unwrap_or_default();
    lookup_ip_address(&state.service, &raw).await
}

/// POST /api/v1/lookup with `{"ipAddress": "<address>"}`
///
/// A body that cannot be read as a lookup request is looked up as the empty
/// string, so the caller still gets a `LookupOutcome`.
pub async fn lookup_post(
    State(state): State<Arc<AppState>>,
    request: Result<Json<LookupRequest>, JsonRejection>,
) -> LookupOutcome {
    let raw = match request {
        Ok(Json(request)) => request.ip_address.unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!("Unusable lookup request body: {}", rejection.body_text());
            String::new()
        }
    };
    lookup_ip_address(&state.service, &raw).await
}

impl IntoResponse for LookupOutcome {
    /// Serializes the outcome as JSON.
    ///
    /// The upstream code stays in the body; the HTTP status only tells the
    /// caller which side failed.
    fn into_response(self) -> Response {
        let status = match &self {
            LookupOutcome::Success { .. } => StatusCode::OK,
            LookupOutcome::Failure { kind, .. } => match kind {
                FailureKind::Validation => StatusCode::BAD_REQUEST,
                FailureKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
                FailureKind::Transport
                | FailureKind::UpstreamHttp
                | FailureKind::UpstreamApplication
                | FailureKind::UpstreamData => StatusCode::BAD_GATEWAY,
            },
        };

        (status, Json(self)).into_response()
    }
}
