mod profiles;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tikstats_scraper::{ProfileClient, ScraperError};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub client: ProfileClient,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            "extraction_failed" | "insufficient_data" => StatusCode::UNPROCESSABLE_ENTITY,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a scrape failure onto the API error envelope.
///
/// Upstream failures are logged at `warn`, extraction failures at `info`.
pub(super) fn map_scraper_error(
    request_id: String,
    username: &str,
    error: &ScraperError,
) -> ApiError {
    match error {
        ScraperError::InvalidUsername { .. } => {
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        ScraperError::ProfileNotFound { .. } => {
            tracing::info!(username, "profile not found upstream");
            ApiError::new(request_id, "not_found", format!("profile @{username} not found"))
        }
        ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. } => {
            tracing::warn!(username, error = %error, "profile fetch failed");
            ApiError::new(request_id, "upstream_error", "failed to fetch profile page")
        }
        ScraperError::MarkerNotFound { .. }
        | ScraperError::InvalidCount { .. }
        | ScraperError::ViewCountOverflow => {
            tracing::info!(username, error = %error, "profile extraction failed");
            ApiError::new(request_id, "extraction_failed", error.to_string())
        }
        ScraperError::Kpi(_) => {
            tracing::info!(username, error = %error, "profile has too little data for KPIs");
            ApiError::new(request_id, "insufficient_data", error.to_string())
        }
        ScraperError::InvalidBaseUrl { .. } => {
            tracing::error!(error = %error, "profile client misconfigured");
            ApiError::new(request_id, "internal_error", "profile client misconfigured")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/{username}", get(profiles::get_profile))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
