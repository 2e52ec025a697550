use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{calculate_basic_from, calculate_detailed_metrics};
use crate::models::{Assumptions, ErrorResponse, MetricsRequest};
use crate::routes::AppState;

/// Configure metrics calculator routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics/basic", web::post().to(basic_metrics))
        .route("/metrics/detailed", web::post().to(detailed_metrics));
}

/// Basic listing metrics
///
/// POST /api/v1/metrics/basic
///
/// Request body:
/// ```json
/// {
///   "financials": { "purchasePrice": 150000, "monthlyRent": 1200, "annualCosts": 0 }
/// }
/// ```
async fn basic_metrics(req: web::Json<MetricsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    HttpResponse::Ok().json(calculate_basic_from(&req.financials))
}

/// Detailed Sharia-compliant metrics
///
/// POST /api/v1/metrics/detailed
///
/// Missing or zero percentages fall back to the configured assumptions.
async fn detailed_metrics(
    state: web::Data<AppState>,
    req: web::Json<MetricsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let assumptions = Assumptions::from_inputs(&req.financials, &state.default_assumptions);

    HttpResponse::Ok().json(calculate_detailed_metrics(&req.financials, &assumptions))
}

pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: {}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
