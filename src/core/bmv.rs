use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::PropertyCandidate;

/// Discount (in percent) at which a deal counts as below market value
const BMV_DISCOUNT_THRESHOLD: Decimal = dec!(10);

/// Calculate the Below Market Value score (0-100) for a property
///
/// Scoring budget:
/// ```text
/// discount      min(discount% * 2, 40)
/// location      location_score        (0-20 from the data source)
/// condition     condition_score       (0-15 from the data source)
/// net yield     15 / 10 / 5 / 0       (>= 8%, >= 6%, >= 4%, below)
/// roi potential min(roi_potential, 10)
/// ```
/// Missing fields contribute nothing. The sum is clamped to 0-100.
pub fn calculate_bmv_score(property: &PropertyCandidate) -> f64 {
    let mut score = 0.0;

    if let Some(discount) = discount_percentage(property.asking_price, property.market_value) {
        score += (discount * 2.0).min(40.0);
    }

    score += property.location_score.unwrap_or(0.0);
    score += property.condition_score.unwrap_or(0.0);
    score += yield_tier_score(property.net_yield.unwrap_or(0.0));
    score += property.roi_potential.unwrap_or(0.0).min(10.0);

    score.clamp(0.0, 100.0)
}

/// Whether a purchase at `price` is a below-market-value deal (10%+ discount)
pub fn is_bmv_deal(price: Option<Decimal>, market_value: Option<Decimal>) -> bool {
    let (Some(price), Some(market_value)) = (price, market_value) else {
        return false;
    };
    if price.is_zero() || market_value.is_zero() {
        return false;
    }

    market_value
        .checked_sub(price)
        .and_then(|discount| discount.checked_div(market_value))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .is_some_and(|percent| percent >= BMV_DISCOUNT_THRESHOLD)
}

/// Percentage discount of `price` against `market_value`
///
/// `None` unless both values are present and non-zero, or when the discount
/// does not fit in a `Decimal`. Negative when the property is priced above
/// its market value.
#[inline]
pub fn discount_percentage(price: Option<Decimal>, market_value: Option<Decimal>) -> Option<f64> {
    let price = price.filter(|p| !p.is_zero())?;
    let market_value = market_value.filter(|m| !m.is_zero())?;

    market_value
        .checked_sub(price)?
        .checked_div(market_value)?
        .checked_mul(dec!(100))?
        .to_f64()
}

#[inline]
fn yield_tier_score(net_yield: f64) -> f64 {
    if net_yield >= 8.0 {
        15.0
    } else if net_yield >= 6.0 {
        10.0
    } else if net_yield >= 4.0 {
        5.0
    } else {
        0.0
    }
}
