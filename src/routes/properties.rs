use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{calculate_bmv_score, discount_percentage, is_bmv_deal};
use crate::models::{
    BmvRequest, BmvResponse, InvestorMatchesQuery, InvestorMatchesResponse, PropertyId,
};
use crate::routes::{catalog_error_response, metrics::validation_failed, AppState};

/// Configure property analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/properties/bmv", web::post().to(score_property))
        .route("/properties/{id}/analytics", web::get().to(property_analytics))
        .route("/properties/{id}/investors", web::get().to(matching_investors));
}

/// BMV score for a posted property
///
/// POST /api/v1/properties/bmv
async fn score_property(req: web::Json<BmvRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let property = &req.property;

    HttpResponse::Ok().json(BmvResponse {
        property_id: property.id,
        bmv_score: calculate_bmv_score(property),
        discount_percentage: discount_percentage(property.asking_price, property.market_value),
        is_bmv_deal: is_bmv_deal(property.asking_price, property.market_value),
    })
}

/// Engagement analytics for a property
///
/// GET /api/v1/properties/{id}/analytics
async fn property_analytics(
    state: web::Data<AppState>,
    path: web::Path<PropertyId>,
) -> impl Responder {
    let property_id = path.into_inner();

    match state.recommendations.property_analytics(property_id).await {
        Ok(analytics) => HttpResponse::Ok().json(analytics),
        Err(e) => catalog_error_response("Failed to load analytics", e),
    }
}

/// Investors best suited to a property
///
/// GET /api/v1/properties/{id}/investors?limit=10
async fn matching_investors(
    state: web::Data<AppState>,
    path: web::Path<PropertyId>,
    query: web::Query<InvestorMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let property_id = path.into_inner();
    let limit = state.limit(query.limit, state.matching.default_limit);

    match state
        .recommendations
        .investors_for_property(property_id, limit)
        .await
    {
        Ok(investors) => {
            tracing::info!(
                "Matched {} investors to property {}",
                investors.len(),
                property_id
            );
            HttpResponse::Ok().json(InvestorMatchesResponse {
                property_id,
                investors,
            })
        }
        Err(e) => catalog_error_response("Failed to match investors", e),
    }
}
