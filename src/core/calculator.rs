use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::models::{
    Assumptions, BasicMetrics, DetailedMetrics, ExpenseMetrics, FinancialInputs,
    InvestmentMetrics, PurchaseMetrics, RentalMetrics, ReturnMetrics,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Calculate listing-level investment metrics
///
/// A missing, zero or negative purchase price or monthly rent yields the
/// all-zero result rather than an error, as does a figure too large to
/// represent.
///
/// # Arguments
/// * `purchase_price` - Price paid for the property
/// * `monthly_rent` - Expected gross monthly rent
/// * `annual_costs` - Recurring yearly costs (ground rent, insurance, ...)
/// * `total_costs` - One-off costs added to the purchase price
pub fn calculate_basic_metrics(
    purchase_price: Option<Decimal>,
    monthly_rent: Option<Decimal>,
    annual_costs: Option<Decimal>,
    total_costs: Option<Decimal>,
) -> BasicMetrics {
    try_basic_metrics(purchase_price, monthly_rent, annual_costs, total_costs).unwrap_or_default()
}

fn try_basic_metrics(
    purchase_price: Option<Decimal>,
    monthly_rent: Option<Decimal>,
    annual_costs: Option<Decimal>,
    total_costs: Option<Decimal>,
) -> Option<BasicMetrics> {
    let purchase_price = positive(purchase_price)?;
    let monthly_rent = positive(monthly_rent)?;

    let annual_rent = monthly_rent.checked_mul(MONTHS_PER_YEAR)?;
    let net_income = annual_rent.checked_sub(annual_costs.unwrap_or_default())?;
    let total_investment = purchase_price.checked_add(total_costs.unwrap_or_default())?;

    Some(BasicMetrics {
        net_yield: round_return(percentage_of(net_income, purchase_price)),
        roi: round_return(percentage_of(net_income, total_investment)),
        annual_rent,
        net_income,
    })
}

/// Basic metrics for a listing, with every one-off cost folded into `total_costs`
pub fn calculate_basic_from(inputs: &FinancialInputs) -> BasicMetrics {
    let Some(total_costs) = inputs.total_costs() else {
        return BasicMetrics::default();
    };

    calculate_basic_metrics(
        inputs.purchase_price,
        inputs.monthly_rent,
        inputs.annual_costs,
        Some(total_costs),
    )
}

/// Calculate the detailed Sharia-compliant breakdown for a deal
///
/// Percentages are taken from `assumptions`; the percentage fields on
/// `inputs` are not read here (see [`Assumptions::from_inputs`]). Each figure
/// builds on the derived figures before it, so the order below matters.
/// Only the three return ratios are rounded.
pub fn calculate_detailed_metrics(
    inputs: &FinancialInputs,
    assumptions: &Assumptions,
) -> DetailedMetrics {
    try_detailed_metrics(inputs, assumptions).unwrap_or_default()
}

fn try_detailed_metrics(inputs: &FinancialInputs, assumptions: &Assumptions) -> Option<DetailedMetrics> {
    let purchase_price = positive(inputs.purchase_price)?;
    let monthly_rent = positive(inputs.monthly_rent)?;

    let stamp_duty = inputs.stamp_duty.unwrap_or_default();
    let legal_fees = inputs.legal_fees.unwrap_or_default();
    let sourcing_fee = inputs.sourcing_fee.unwrap_or_default();
    let refurbishment_cost = inputs.refurbishment_cost.unwrap_or_default();
    let other_costs = inputs.other_costs.unwrap_or_default();
    let annual_costs = inputs.annual_costs.unwrap_or_default();

    let total_purchase_costs = checked_sum(&[purchase_price, stamp_duty, legal_fees, sourcing_fee])?;
    let total_investment = checked_sum(&[total_purchase_costs, refurbishment_cost, other_costs])?;

    let annual_rent = monthly_rent.checked_mul(MONTHS_PER_YEAR)?;
    let void_allowance = share_of(annual_rent, assumptions.void_percentage)?;
    let effective_annual_rent = annual_rent.checked_sub(void_allowance)?;

    let maintenance_cost = share_of(effective_annual_rent, assumptions.maintenance_percentage)?;
    let management_cost = share_of(effective_annual_rent, assumptions.management_percentage)?;
    let total_annual_expenses = checked_sum(&[annual_costs, maintenance_cost, management_cost])?;

    let net_annual_income = effective_annual_rent.checked_sub(total_annual_expenses)?;

    let net_yield = percentage_of(net_annual_income, purchase_price);
    let roi = percentage_of(net_annual_income, total_investment);
    // Same base as roi; cash invested is not modelled separately yet.
    let cash_on_cash_return = percentage_of(net_annual_income, total_investment);

    Some(DetailedMetrics {
        purchase_metrics: PurchaseMetrics {
            purchase_price,
            stamp_duty,
            legal_fees,
            sourcing_fee,
            total_purchase_costs,
        },
        investment_metrics: InvestmentMetrics {
            refurbishment_cost,
            other_costs,
            total_investment,
        },
        rental_metrics: RentalMetrics {
            monthly_rent,
            annual_rent,
            void_allowance,
            effective_annual_rent,
        },
        expense_metrics: ExpenseMetrics {
            annual_costs,
            maintenance_cost,
            management_cost,
            total_annual_expenses,
        },
        return_metrics: ReturnMetrics {
            net_annual_income,
            net_yield: round_return(net_yield),
            roi: round_return(roi),
            cash_on_cash_return: round_return(cash_on_cash_return),
        },
        assumptions: *assumptions,
    })
}

impl Assumptions {
    /// Resolve the percentages for a deal, falling back to `defaults` for any
    /// percentage that is missing or zero
    pub fn from_inputs(inputs: &FinancialInputs, defaults: &Assumptions) -> Self {
        let pick = |value: Option<Decimal>, fallback: Decimal| match value {
            Some(v) if !v.is_zero() => v,
            _ => fallback,
        };

        Self {
            void_percentage: pick(inputs.void_percentage, defaults.void_percentage),
            maintenance_percentage: pick(
                inputs.maintenance_percentage,
                defaults.maintenance_percentage,
            ),
            management_percentage: pick(
                inputs.management_percentage,
                defaults.management_percentage,
            ),
        }
    }
}

#[inline]
fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| v.is_sign_positive() && !v.is_zero())
}

/// Sum of `values`, or `None` if it does not fit in a `Decimal`
#[inline]
fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
}

/// `percentage`% of `amount`
#[inline]
fn share_of(amount: Decimal, percentage: Decimal) -> Option<Decimal> {
    amount.checked_mul(percentage.checked_div(HUNDRED)?)
}

/// `numerator / denominator * 100`, or zero when the denominator is not positive
#[inline]
fn percentage_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or_default()
}

#[inline]
fn round_return(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed_inputs() -> FinancialInputs {
        FinancialInputs {
            purchase_price: Some(dec!(200000)),
            monthly_rent: Some(dec!(1500)),
            refurbishment_cost: Some(dec!(10000)),
            stamp_duty: Some(dec!(6000)),
            legal_fees: Some(dec!(2000)),
            sourcing_fee: Some(dec!(3000)),
            other_costs: Some(dec!(0)),
            annual_costs: Some(dec!(1000)),
            void_percentage: Some(dec!(10)),
            maintenance_percentage: Some(dec!(5)),
            management_percentage: Some(dec!(10)),
        }
    }

    #[test]
    fn test_basic_metrics() {
        let metrics = calculate_basic_metrics(
            Some(dec!(150000)),
            Some(dec!(1200)),
            Some(dec!(0)),
            Some(dec!(0)),
        );

        assert_eq!(metrics.annual_rent, dec!(14400));
        assert_eq!(metrics.net_income, dec!(14400));
        assert_eq!(metrics.net_yield, dec!(9.6));
        assert_eq!(metrics.roi, dec!(9.6));
    }

    #[test]
    fn test_basic_metrics_costs_lower_roi_only() {
        let metrics = calculate_basic_metrics(
            Some(dec!(100000)),
            Some(dec!(500)),
            Some(dec!(1000)),
            Some(dec!(25000)),
        );

        assert_eq!(metrics.net_income, dec!(5000));
        assert_eq!(metrics.net_yield, dec!(5));
        assert_eq!(metrics.roi, dec!(4));
    }

    #[test]
    fn test_basic_metrics_short_circuit() {
        let zero = BasicMetrics::default();

        assert_eq!(calculate_basic_metrics(None, Some(dec!(1200)), None, None), zero);
        assert_eq!(calculate_basic_metrics(Some(dec!(150000)), None, None, None), zero);
        assert_eq!(
            calculate_basic_metrics(Some(dec!(0)), Some(dec!(1200)), None, None),
            zero
        );
        assert_eq!(
            calculate_basic_metrics(Some(dec!(-5)), Some(dec!(1200)), None, None),
            zero
        );
        assert_eq!(
            calculate_basic_metrics(Some(dec!(150000)), Some(dec!(-1)), None, None),
            zero
        );
    }

    #[test]
    fn test_basic_from_inputs_folds_costs() {
        let metrics = calculate_basic_from(&detailed_inputs());

        // 18000 - 1000 over 200000 and over 221000
        assert_eq!(metrics.net_income, dec!(17000));
        assert_eq!(metrics.net_yield, dec!(8.5));
        assert_eq!(metrics.roi, dec!(7.69));
    }

    #[test]
    fn test_detailed_metrics() {
        let metrics = calculate_detailed_metrics(&detailed_inputs(), &Assumptions::default());

        assert_eq!(metrics.purchase_metrics.total_purchase_costs, dec!(211000));
        assert_eq!(metrics.investment_metrics.total_investment, dec!(221000));
        assert_eq!(metrics.rental_metrics.annual_rent, dec!(18000));
        assert_eq!(metrics.rental_metrics.void_allowance, dec!(1800));
        assert_eq!(metrics.rental_metrics.effective_annual_rent, dec!(16200));
        assert_eq!(metrics.expense_metrics.maintenance_cost, dec!(810));
        assert_eq!(metrics.expense_metrics.management_cost, dec!(1620));
        assert_eq!(metrics.expense_metrics.total_annual_expenses, dec!(3430));
        assert_eq!(metrics.return_metrics.net_annual_income, dec!(12770));
        assert_eq!(metrics.return_metrics.net_yield, dec!(6.39));
        assert_eq!(metrics.return_metrics.roi, dec!(5.78));
        assert_eq!(metrics.return_metrics.cash_on_cash_return, dec!(5.78));
    }

    #[test]
    fn test_detailed_metrics_echo_assumptions() {
        let assumptions = Assumptions {
            void_percentage: dec!(0),
            maintenance_percentage: dec!(8),
            management_percentage: dec!(12),
        };

        let metrics = calculate_detailed_metrics(&detailed_inputs(), &assumptions);

        assert_eq!(metrics.assumptions, assumptions);
        assert_eq!(metrics.rental_metrics.void_allowance, dec!(0));
        assert_eq!(metrics.rental_metrics.effective_annual_rent, dec!(18000));
        assert_eq!(metrics.expense_metrics.maintenance_cost, dec!(1440));
    }

    #[test]
    fn test_detailed_metrics_empty_path() {
        let mut inputs = detailed_inputs();
        inputs.monthly_rent = None;

        let metrics = calculate_detailed_metrics(&inputs, &Assumptions {
            void_percentage: dec!(20),
            maintenance_percentage: dec!(20),
            management_percentage: dec!(20),
        });

        assert_eq!(metrics, DetailedMetrics::default());
        assert_eq!(metrics.assumptions.void_percentage, dec!(10));
        assert_eq!(metrics.assumptions.maintenance_percentage, dec!(5));
        assert_eq!(metrics.assumptions.management_percentage, dec!(10));
        assert_eq!(metrics.return_metrics.net_yield, dec!(0));
    }

    #[test]
    fn test_negative_costs_propagate() {
        let mut inputs = detailed_inputs();
        inputs.stamp_duty = Some(dec!(-6000));

        let metrics = calculate_detailed_metrics(&inputs, &Assumptions::default());

        assert_eq!(metrics.purchase_metrics.total_purchase_costs, dec!(199000));
        assert_eq!(metrics.investment_metrics.total_investment, dec!(209000));
    }

    #[test]
    fn test_assumptions_fall_back_on_missing_or_zero() {
        let defaults = Assumptions::default();
        let inputs = FinancialInputs {
            void_percentage: Some(dec!(0)),
            maintenance_percentage: None,
            management_percentage: Some(dec!(12)),
            ..Default::default()
        };

        let resolved = Assumptions::from_inputs(&inputs, &defaults);

        assert_eq!(resolved.void_percentage, dec!(10));
        assert_eq!(resolved.maintenance_percentage, dec!(5));
        assert_eq!(resolved.management_percentage, dec!(12));
    }

    #[test]
    fn test_basic_metrics_overflow_yields_zero() {
        let zero = BasicMetrics::default();

        assert_eq!(calculate_basic_metrics(Some(dec!(1)), Some(Decimal::MAX), None, None), zero);
        assert_eq!(
            calculate_basic_metrics(Some(Decimal::MAX), Some(dec!(1000)), None, Some(Decimal::MAX)),
            zero
        );
        assert_eq!(
            calculate_basic_metrics(Some(dec!(1000)), Some(dec!(100)), Some(Decimal::MIN), None),
            zero
        );
    }

    #[test]
    fn test_basic_from_overflowing_costs_yields_zero() {
        let mut inputs = detailed_inputs();
        inputs.refurbishment_cost = Some(Decimal::MAX);
        inputs.other_costs = Some(Decimal::MAX);

        assert_eq!(calculate_basic_from(&inputs), BasicMetrics::default());
    }

    #[test]
    fn test_detailed_metrics_overflow_yields_empty_result() {
        let mut inputs = detailed_inputs();
        inputs.monthly_rent = Some(Decimal::MAX / dec!(10));
        assert_eq!(
            calculate_detailed_metrics(&inputs, &Assumptions::default()),
            DetailedMetrics::default()
        );

        let mut inputs = detailed_inputs();
        inputs.stamp_duty = Some(Decimal::MAX);
        assert_eq!(
            calculate_detailed_metrics(&inputs, &Assumptions::default()),
            DetailedMetrics::default()
        );
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum(&[dec!(1), dec!(2.5)]), Some(dec!(3.5)));
        assert_eq!(checked_sum(&[]), Some(Decimal::ZERO));
        assert_eq!(checked_sum(&[Decimal::MAX, dec!(1)]), None);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(round_return(dec!(6.385)), dec!(6.39));
        assert_eq!(round_return(dec!(-6.385)), dec!(-6.39));
        assert_eq!(round_return(dec!(5.7782)), dec!(5.78));
    }
}
