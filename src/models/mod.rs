// Model exports
pub mod domain;
pub mod metrics;
pub mod requests;
pub mod responses;

pub use domain::{
    DealInterest, FinancialInputs, InterestLevel, InvestmentStrategy, InvestorId, InvestorMatch,
    InvestorPreferences, InvestorProfile, MatchResult, PropertyAnalytics, PropertyCandidate,
    PropertyId, Recommendation,
};
pub use metrics::{
    Assumptions, BasicMetrics, DetailedMetrics, ExpenseMetrics, InvestmentMetrics,
    PurchaseMetrics, RentalMetrics, ReturnMetrics,
};
pub use requests::{
    BmvRequest, InvestorMatchesQuery, MatchRequest, MetricsRequest, RecordInterestRequest,
};
pub use responses::{
    BmvResponse, ErrorResponse, HealthResponse, InvestorMatchesResponse, RankResponse,
    RecommendResponse, RecordInterestResponse,
};
