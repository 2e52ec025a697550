use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{FinancialInputs, InvestorId, PropertyCandidate, PropertyId};

/// Request to calculate metrics for a set of financial inputs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_financials"))]
pub struct MetricsRequest {
    pub financials: FinancialInputs,
}

/// Largest monetary amount accepted on a request
const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Money must be non-negative and no larger than [`MAX_AMOUNT`]
fn validate_amounts(amounts: &[Option<Decimal>]) -> Result<(), ValidationError> {
    let mut amounts = amounts.iter().flatten();

    if amounts.clone().any(|v| v.is_sign_negative() && !v.is_zero()) {
        let mut err = ValidationError::new("negative_amount");
        err.message = Some("monetary fields must not be negative".into());
        return Err(err);
    }
    if amounts.any(|v| *v > MAX_AMOUNT) {
        let mut err = ValidationError::new("amount_too_large");
        err.message = Some(format!("monetary fields must not exceed {}", MAX_AMOUNT).into());
        return Err(err);
    }

    Ok(())
}

/// Money within bounds and percentages within 0-100
fn validate_financials(req: &MetricsRequest) -> Result<(), ValidationError> {
    let f = &req.financials;

    validate_amounts(&[
        f.purchase_price,
        f.monthly_rent,
        f.refurbishment_cost,
        f.stamp_duty,
        f.legal_fees,
        f.sourcing_fee,
        f.other_costs,
        f.annual_costs,
    ])?;

    let percentages = [
        f.void_percentage,
        f.maintenance_percentage,
        f.management_percentage,
    ];
    let hundred = Decimal::ONE_HUNDRED;
    if percentages
        .iter()
        .flatten()
        .any(|v| *v < Decimal::ZERO || *v > hundred)
    {
        let mut err = ValidationError::new("percentage_out_of_range");
        err.message = Some("percentages must be between 0 and 100".into());
        return Err(err);
    }

    Ok(())
}

/// Request to score a single property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_property"))]
pub struct BmvRequest {
    pub property: PropertyCandidate,
}

/// Prices within bounds, location 0-20 and condition 0-15
fn validate_property(req: &BmvRequest) -> Result<(), ValidationError> {
    let p = &req.property;

    validate_amounts(&[p.asking_price, p.market_value])?;

    let within = |value: Option<f64>, max: f64| value.map_or(true, |v| (0.0..=max).contains(&v));
    if !within(p.location_score, 20.0) {
        let mut err = ValidationError::new("location_score_out_of_range");
        err.message = Some("locationScore must be between 0 and 20".into());
        return Err(err);
    }
    if !within(p.condition_score, 15.0) {
        let mut err = ValidationError::new("condition_score_out_of_range");
        err.message = Some("conditionScore must be between 0 and 15".into());
        return Err(err);
    }

    Ok(())
}

/// Request to rank or recommend properties for an investor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(alias = "investor_id", rename = "investorId")]
    pub investor_id: InvestorId,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query for the investors matching a property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InvestorMatchesQuery {
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to record an investor's interest in a property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordInterestRequest {
    #[serde(alias = "investor_id", rename = "investorId")]
    pub investor_id: InvestorId,
    #[serde(alias = "property_id", rename = "propertyId")]
    pub property_id: PropertyId,
    #[validate(length(min = 1))]
    #[serde(alias = "interest_level", rename = "interestLevel", default = "default_interest_level")]
    pub interest_level: String,
}

fn default_interest_level() -> String {
    "interested".to_string()
}
