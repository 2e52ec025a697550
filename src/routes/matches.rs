use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, HealthResponse, InterestLevel, MatchRequest, RankResponse, RecommendResponse,
    RecordInterestRequest, RecordInterestResponse,
};
use crate::routes::{catalog_error_response, metrics::validation_failed, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_properties))
        .route("/matches/recommend", web::post().to(recommend_properties))
        .route("/matches/interest", web::post().to(record_interest));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (properties, investors) = state.recommendations.catalog().counts().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        properties,
        investors,
        timestamp: chrono::Utc::now(),
    })
}

/// Rank published properties for an investor
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "investorId": 42,
///   "limit": 10
/// }
/// ```
async fn rank_properties(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let investor_id = req.investor_id;
    let limit = state.limit(req.limit, state.matching.default_limit);

    tracing::info!("Ranking properties for investor: {}, limit: {}", investor_id, limit);

    match state.recommendations.rank_for_investor(investor_id, limit).await {
        Ok(ranking) => {
            tracing::info!(
                "Returning {} matches for investor {} (from {} candidates)",
                ranking.matches.len(),
                investor_id,
                ranking.total_candidates
            );
            HttpResponse::Ok().json(RankResponse {
                investor_id,
                matches: ranking.matches,
                total_candidates: ranking.total_candidates,
            })
        }
        Err(e) => catalog_error_response("Failed to rank properties", e),
    }
}

/// Personalised recommendations, excluding properties already engaged with
///
/// POST /api/v1/matches/recommend
async fn recommend_properties(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let investor_id = req.investor_id;
    let limit = state.limit(req.limit, state.matching.recommendation_limit);

    let recommendations = state
        .recommendations
        .recommend_for_investor(investor_id, limit)
        .await;

    tracing::info!(
        "Returning {} recommendations for investor {}",
        recommendations.len(),
        investor_id
    );

    HttpResponse::Ok().json(RecommendResponse {
        investor_id,
        recommendations,
    })
}

/// Record an investor's interest in a property
///
/// POST /api/v1/matches/interest
///
/// Request body:
/// ```json
/// {
///   "investorId": 42,
///   "propertyId": 7,
///   "interestLevel": "viewed|saved|interested|very_interested"
/// }
/// ```
async fn record_interest(
    state: web::Data<AppState>,
    req: web::Json<RecordInterestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let interest_level = match req.interest_level.to_lowercase().as_str() {
        "viewed" => InterestLevel::Viewed,
        "saved" => InterestLevel::Saved,
        "interested" => InterestLevel::Interested,
        "very_interested" => InterestLevel::VeryInterested,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid interest level".to_string(),
                message: "Interest level must be one of: viewed, saved, interested, very_interested"
                    .to_string(),
                status_code: 400,
            });
        }
    };

    match state
        .recommendations
        .catalog()
        .record_interest(req.investor_id, req.property_id, interest_level)
        .await
    {
        Ok((interest, created)) => {
            tracing::debug!(
                "Recorded interest: {} -> {} ({:?}, created: {})",
                interest.investor_id,
                interest.property_id,
                interest.interest_level,
                created
            );
            HttpResponse::Ok().json(RecordInterestResponse {
                success: true,
                created,
                investor_id: interest.investor_id,
                property_id: interest.property_id,
                interest_level: interest.interest_level,
            })
        }
        Err(e) => catalog_error_response("Failed to record interest", e),
    }
}
