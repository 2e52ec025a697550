use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Listing-level metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMetrics {
    pub net_yield: Decimal,
    pub roi: Decimal,
    pub annual_rent: Decimal,
    pub net_income: Decimal,
}

/// Percentages used to derive the running costs of a let
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub void_percentage: Decimal,
    pub maintenance_percentage: Decimal,
    pub management_percentage: Decimal,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            void_percentage: dec!(10),
            maintenance_percentage: dec!(5),
            management_percentage: dec!(10),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseMetrics {
    pub purchase_price: Decimal,
    pub stamp_duty: Decimal,
    pub legal_fees: Decimal,
    pub sourcing_fee: Decimal,
    pub total_purchase_costs: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMetrics {
    pub refurbishment_cost: Decimal,
    pub other_costs: Decimal,
    pub total_investment: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalMetrics {
    pub monthly_rent: Decimal,
    pub annual_rent: Decimal,
    pub void_allowance: Decimal,
    pub effective_annual_rent: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseMetrics {
    pub annual_costs: Decimal,
    pub maintenance_cost: Decimal,
    pub management_cost: Decimal,
    pub total_annual_expenses: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnMetrics {
    pub net_annual_income: Decimal,
    pub net_yield: Decimal,
    pub roi: Decimal,
    pub cash_on_cash_return: Decimal,
}

/// Full Sharia-compliant breakdown shown on a property detail page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub purchase_metrics: PurchaseMetrics,
    pub investment_metrics: InvestmentMetrics,
    pub rental_metrics: RentalMetrics,
    pub expense_metrics: ExpenseMetrics,
    pub return_metrics: ReturnMetrics,
    pub assumptions: Assumptions,
}
