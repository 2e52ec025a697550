//! Sharia Deals - investment metrics and investor matching for a
//! Sharia-compliant property marketplace.
//!
//! The [`core`] module holds the two calculation components: the financial
//! metrics calculator and the BMV/preference matching engine. Both are pure
//! functions of their inputs. [`services`] and [`routes`] wrap them in an
//! in-process catalog and an HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    calculate_basic_metrics, calculate_bmv_score, calculate_detailed_metrics,
    calculate_match_score, Matcher,
};
pub use models::{
    BasicMetrics, DetailedMetrics, FinancialInputs, InvestorPreferences, MatchResult,
    PropertyCandidate, Recommendation,
};
