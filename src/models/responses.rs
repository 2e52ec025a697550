use serde::{Deserialize, Serialize};

use crate::models::domain::{
    InterestLevel, InvestorId, InvestorMatch, MatchResult, PropertyId, Recommendation,
};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub properties: usize,
    pub investors: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// BMV analysis of a single property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmvResponse {
    pub property_id: PropertyId,
    pub bmv_score: f64,
    pub discount_percentage: Option<f64>,
    pub is_bmv_deal: bool,
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub investor_id: InvestorId,
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub investor_id: InvestorId,
    pub recommendations: Vec<Recommendation>,
}

/// Investors ranked for one property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorMatchesResponse {
    pub property_id: PropertyId,
    pub investors: Vec<InvestorMatch>,
}

/// Record interest response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInterestResponse {
    pub success: bool,
    pub created: bool,
    pub investor_id: InvestorId,
    pub property_id: PropertyId,
    pub interest_level: InterestLevel,
}
