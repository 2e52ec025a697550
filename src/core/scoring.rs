use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::filters::{preference_amount, preference_yield};
use crate::models::{InvestorPreferences, PropertyCandidate};

const BUDGET_POINTS: f64 = 30.0;
const REGION_POINTS: f64 = 25.0;
const PROPERTY_TYPE_POINTS: f64 = 20.0;
const YIELD_POINTS: f64 = 15.0;
const STRATEGY_POINTS: f64 = 10.0;

/// Calculate how well a property fits an investor's preferences (0-100)
///
/// Scoring budget:
/// ```text
/// budget fit     0-30   closeness of asking price to the middle of the budget
/// region         25     region is one of the target regions
/// property type  20     type is one of the wanted types
/// yield          15     net yield meets the minimum
/// strategy       10     same investment strategy
/// ```
/// Each signal is skipped when the preference (or the property field it
/// compares against) is absent.
pub fn calculate_match_score(property: &PropertyCandidate, preferences: &InvestorPreferences) -> f64 {
    let mut score = 0.0;

    score += calculate_budget_score(
        property.asking_price,
        preferences.min_investment,
        preferences.max_investment,
    );

    if listed(&preferences.target_regions, property.region.as_deref()) {
        score += REGION_POINTS;
    }

    if listed(&preferences.property_types, property.property_type.as_deref()) {
        score += PROPERTY_TYPE_POINTS;
    }

    if let (Some(min_yield), Some(net_yield)) = (
        preference_yield(preferences.min_yield),
        property.net_yield.filter(|y| *y != 0.0),
    ) {
        if net_yield >= min_yield {
            score += YIELD_POINTS;
        }
    }

    if let (Some(wanted), Some(offered)) =
        (preferences.investment_strategy, property.investment_strategy)
    {
        if wanted == offered {
            score += STRATEGY_POINTS;
        }
    }

    score.clamp(0.0, 100.0)
}

/// Calculate budget fit (0-30)
///
/// Full points at the centre of the min/max range, falling linearly to zero
/// once the price is a whole range-width away from the centre. A collapsed or
/// inverted range only rewards an exact hit on the centre.
#[inline]
fn calculate_budget_score(
    asking_price: Option<Decimal>,
    min_investment: Option<Decimal>,
    max_investment: Option<Decimal>,
) -> f64 {
    let (Some(min), Some(max), Some(price)) = (
        preference_amount(min_investment),
        preference_amount(max_investment),
        asking_price.filter(|p| !p.is_zero()),
    ) else {
        return 0.0;
    };

    let Some((range, distance)) = budget_distance(price, min, max) else {
        return 0.0;
    };

    if range <= Decimal::ZERO {
        return if distance.is_zero() { BUDGET_POINTS } else { 0.0 };
    }

    let relative = distance
        .checked_div(range)
        .and_then(|r| r.to_f64())
        .unwrap_or(f64::INFINITY);

    (BUDGET_POINTS - relative * BUDGET_POINTS).max(0.0)
}

/// Width of the budget range and the price's distance from its centre
#[inline]
fn budget_distance(price: Decimal, min: Decimal, max: Decimal) -> Option<(Decimal, Decimal)> {
    let range = max.checked_sub(min)?;
    let center = min.checked_add(range / dec!(2))?;
    let distance = price.checked_sub(center)?.abs();
    Some((range, distance))
}

#[inline]
fn listed(allowed: &[String], value: Option<&str>) -> bool {
    match value {
        Some(v) if !allowed.is_empty() => allowed.iter().any(|a| a == v),
        _ => false,
    }
}
