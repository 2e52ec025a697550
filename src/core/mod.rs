// Core algorithm exports
pub mod bmv;
pub mod calculator;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use bmv::{calculate_bmv_score, discount_percentage, is_bmv_deal};
pub use calculator::{calculate_basic_from, calculate_basic_metrics, calculate_detailed_metrics};
pub use filters::matches_hard_constraints;
pub use matcher::{Matcher, Ranking};
pub use scoring::calculate_match_score;
