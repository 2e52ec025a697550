// Route exports
pub mod matches;
pub mod metrics;
pub mod properties;

use actix_web::{error, http::StatusCode, web, HttpResponse};

use crate::config::MatchingSettings;
use crate::models::{Assumptions, ErrorResponse};
use crate::services::{CatalogError, RecommendationService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
    pub default_assumptions: Assumptions,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Requested limit, or `default` when absent, capped at the configured maximum
    pub fn limit(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).min(self.matching.max_limit)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(metrics::configure)
            .configure(properties::configure),
    );
}

/// Map a catalog failure to a JSON error response
pub(crate) fn catalog_error_response(context: &str, err: CatalogError) -> HttpResponse {
    let status = match err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Io(_) | CatalogError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("{}: {}", context, err);
    } else {
        tracing::info!("{}: {}", context, err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

/// JSON error response for payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}
