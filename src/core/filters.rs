use rust_decimal::Decimal;

use crate::models::{InvestorPreferences, PropertyCandidate};

/// Check a property against an investor's hard constraints
///
/// This is the pre-filter stage of ranking: a property that fails here is
/// dropped, not scored low. A constraint is active only when the preference
/// is set (non-empty list, non-zero bound). A property missing the field an
/// active constraint looks at fails that constraint.
#[inline]
pub fn matches_hard_constraints(
    property: &PropertyCandidate,
    preferences: &InvestorPreferences,
) -> bool {
    matches_budget(property, preferences)
        && matches_region(property, preferences)
        && matches_property_type(property, preferences)
        && matches_min_yield(property, preferences)
}

/// Asking price within the investor's min/max investment bounds
#[inline]
pub fn matches_budget(property: &PropertyCandidate, preferences: &InvestorPreferences) -> bool {
    if let Some(min) = preference_amount(preferences.min_investment) {
        match property.asking_price {
            Some(price) if price >= min => {}
            _ => return false,
        }
    }

    if let Some(max) = preference_amount(preferences.max_investment) {
        match property.asking_price {
            Some(price) if price <= max => {}
            _ => return false,
        }
    }

    true
}

#[inline]
pub fn matches_region(property: &PropertyCandidate, preferences: &InvestorPreferences) -> bool {
    contains_if_constrained(&preferences.target_regions, property.region.as_deref())
}

#[inline]
pub fn matches_property_type(
    property: &PropertyCandidate,
    preferences: &InvestorPreferences,
) -> bool {
    contains_if_constrained(&preferences.property_types, property.property_type.as_deref())
}

#[inline]
pub fn matches_min_yield(property: &PropertyCandidate, preferences: &InvestorPreferences) -> bool {
    match preference_yield(preferences.min_yield) {
        Some(min_yield) => property.net_yield.is_some_and(|y| y >= min_yield),
        None => true,
    }
}

/// A money preference counts as set only when it is non-zero
#[inline]
pub(crate) fn preference_amount(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// A yield preference counts as set only when it is non-zero
#[inline]
pub(crate) fn preference_yield(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

#[inline]
fn contains_if_constrained(allowed: &[String], value: Option<&str>) -> bool {
    if allowed.is_empty() {
        return true;
    }

    value.is_some_and(|v| allowed.iter().any(|a| a == v))
}
