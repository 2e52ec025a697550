use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type PropertyId = u64;
pub type InvestorId = u64;

/// Raw financial fields of a property or deal package
///
/// Every field is optional; the calculator treats an absent value as zero
/// (or, for the percentages, as the configured default assumption).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInputs {
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub monthly_rent: Option<Decimal>,
    #[serde(default)]
    pub refurbishment_cost: Option<Decimal>,
    #[serde(default)]
    pub stamp_duty: Option<Decimal>,
    #[serde(default)]
    pub legal_fees: Option<Decimal>,
    #[serde(default)]
    pub sourcing_fee: Option<Decimal>,
    #[serde(default)]
    pub other_costs: Option<Decimal>,
    #[serde(default)]
    pub annual_costs: Option<Decimal>,
    #[serde(default)]
    pub void_percentage: Option<Decimal>,
    #[serde(default)]
    pub maintenance_percentage: Option<Decimal>,
    #[serde(default)]
    pub management_percentage: Option<Decimal>,
}

impl FinancialInputs {
    /// One-off costs on top of the purchase price, `None` on overflow
    pub fn total_costs(&self) -> Option<Decimal> {
        [
            self.refurbishment_cost,
            self.stamp_duty,
            self.legal_fees,
            self.sourcing_fee,
            self.other_costs,
        ]
        .iter()
        .try_fold(Decimal::ZERO, |acc, cost| acc.checked_add(cost.unwrap_or_default()))
    }
}

/// Investment strategy of a deal package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStrategy {
    /// Buy to let
    Btl,
    /// Buy, refurbish, rent, refinance
    Brrr,
    /// Fix and flip
    Flip,
    /// House in multiple occupation
    Hmo,
    Commercial,
    Development,
}

/// Published property as seen by the matching engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCandidate {
    pub id: PropertyId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub market_value: Option<Decimal>,
    #[serde(default)]
    pub asking_price: Option<Decimal>,
    /// 0-20, pre-capped by the data source
    #[serde(default)]
    pub location_score: Option<f64>,
    /// 0-15, pre-capped by the data source
    #[serde(default)]
    pub condition_score: Option<f64>,
    #[serde(default)]
    pub net_yield: Option<f64>,
    #[serde(default)]
    pub roi_potential: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub investment_strategy: Option<InvestmentStrategy>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Investor matching preferences
///
/// Empty lists and `None` mean "no preference": the corresponding filter and
/// score signal are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorPreferences {
    #[serde(default)]
    pub min_investment: Option<Decimal>,
    #[serde(default)]
    pub max_investment: Option<Decimal>,
    #[serde(default)]
    pub target_regions: Vec<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub min_yield: Option<f64>,
    #[serde(default)]
    pub investment_strategy: Option<InvestmentStrategy>,
}

/// Registered investor with their preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    pub id: InvestorId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub preferences: InvestorPreferences,
}

/// How strongly an investor engaged with a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestLevel {
    Viewed,
    Saved,
    Interested,
    VeryInterested,
}

/// Activity-log record linking an investor to a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealInterest {
    pub investor_id: InvestorId,
    pub property_id: PropertyId,
    pub interest_level: InterestLevel,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Scored property for one investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub property: PropertyCandidate,
    pub match_score: f64,
    pub bmv_score: f64,
    pub total_score: f64,
}

/// Scored investor for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorMatch {
    pub investor_id: InvestorId,
    pub name: String,
    pub match_score: f64,
    pub bmv_score: f64,
    pub total_score: f64,
}

/// Condensed match result handed to the investor dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub property_id: PropertyId,
    pub title: String,
    pub location: Option<String>,
    pub asking_price: Option<Decimal>,
    pub net_yield: Option<f64>,
    pub bmv_score: f64,
    pub match_score: f64,
    pub total_score: f64,
    pub image_url: Option<String>,
}

impl From<MatchResult> for Recommendation {
    fn from(result: MatchResult) -> Self {
        let property = result.property;
        Self {
            property_id: property.id,
            image_url: property.images.into_iter().next(),
            title: property.title,
            location: property.location,
            asking_price: property.asking_price,
            net_yield: property.net_yield,
            bmv_score: result.bmv_score,
            match_score: result.match_score,
            total_score: result.total_score,
        }
    }
}

/// Engagement statistics for a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnalytics {
    pub property_id: PropertyId,
    pub total_views: usize,
    pub interested_count: usize,
    pub very_interested_count: usize,
    pub interest_rate: f64,
    pub very_interest_rate: f64,
    pub bmv_score: f64,
    pub avg_match_score: f64,
}
