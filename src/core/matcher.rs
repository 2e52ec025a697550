use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::core::{
    bmv::calculate_bmv_score,
    filters::matches_hard_constraints,
    scoring::calculate_match_score,
};
use crate::models::{
    DealInterest, InterestLevel, InvestorId, InvestorMatch, InvestorPreferences, InvestorProfile,
    MatchResult, PropertyAnalytics, PropertyCandidate, PropertyId, Recommendation,
};

/// Result of ranking a candidate pool
#[derive(Debug)]
pub struct Ranking {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Hard preference filtering (budget, region, type, yield)
/// 2. Match and BMV scoring
/// 3. Ranking by the mean of both scores
///
/// Every method is a pure function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    oversample_factor: usize,
}

impl Matcher {
    pub fn new(oversample_factor: usize) -> Self {
        Self {
            oversample_factor: oversample_factor.max(1),
        }
    }

    /// Rank candidate properties for an investor
    ///
    /// # Arguments
    /// * `preferences` - The investor's matching preferences
    /// * `candidates` - Published properties supplied by the catalog
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// Ranking sorted by total score, descending. Ties keep input order.
    pub fn rank_properties_for_investor(
        &self,
        preferences: &InvestorPreferences,
        candidates: Vec<PropertyCandidate>,
        limit: usize,
    ) -> Ranking {
        let total_candidates = candidates.len();

        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            // Stage 1: hard constraints
            .filter(|property| matches_hard_constraints(property, preferences))
            // Stage 2: scoring
            .map(|property| {
                let match_score = calculate_match_score(&property, preferences);
                let bmv_score = calculate_bmv_score(&property);

                MatchResult {
                    property,
                    match_score,
                    bmv_score,
                    total_score: (match_score + bmv_score) / 2.0,
                }
            })
            .collect();

        tracing::debug!(
            "Ranked {} of {} candidates",
            matches.len(),
            total_candidates
        );

        // Stage 3: stable sort keeps input order among equal scores
        matches.sort_by(|a, b| by_score_desc(a.total_score, b.total_score));
        matches.truncate(limit);

        Ranking {
            matches,
            total_candidates,
        }
    }

    /// Recommend properties the investor has not engaged with yet
    ///
    /// Ranks an oversampled pool, then drops engaged and duplicate
    /// properties until `limit` recommendations are collected.
    pub fn recommend_for_investor(
        &self,
        preferences: &InvestorPreferences,
        candidates: Vec<PropertyCandidate>,
        engaged: &HashSet<PropertyId>,
        limit: usize,
    ) -> Vec<Recommendation> {
        let ranking = self.rank_properties_for_investor(
            preferences,
            candidates,
            limit.saturating_mul(self.oversample_factor),
        );

        let mut seen = HashSet::new();
        ranking
            .matches
            .into_iter()
            .filter(|m| !engaged.contains(&m.property.id))
            .filter(|m| seen.insert(m.property.id))
            .take(limit)
            .map(Recommendation::from)
            .collect()
    }

    /// Rank investors for a newly published property
    ///
    /// Applies each investor's hard constraints to the property; investors
    /// whose constraints reject it are not returned.
    pub fn match_property_to_investors(
        &self,
        property: &PropertyCandidate,
        investors: Vec<InvestorProfile>,
        limit: usize,
    ) -> Vec<InvestorMatch> {
        let bmv_score = calculate_bmv_score(property);

        let mut matches: Vec<InvestorMatch> = investors
            .into_iter()
            .filter(|investor| matches_hard_constraints(property, &investor.preferences))
            .map(|investor| {
                let match_score = calculate_match_score(property, &investor.preferences);

                InvestorMatch {
                    investor_id: investor.id,
                    name: investor.name,
                    match_score,
                    bmv_score,
                    total_score: (match_score + bmv_score) / 2.0,
                }
            })
            .collect();

        matches.sort_by(|a, b| by_score_desc(a.total_score, b.total_score));
        matches.truncate(limit);
        matches
    }

    /// Summarise investor engagement with a property
    ///
    /// `interests` may cover other properties; only records for `property`
    /// are counted. The average match score covers records whose investor is
    /// present in `investors`.
    pub fn property_analytics(
        &self,
        property: &PropertyCandidate,
        interests: &[DealInterest],
        investors: &HashMap<InvestorId, InvestorProfile>,
    ) -> PropertyAnalytics {
        let records: Vec<&DealInterest> = interests
            .iter()
            .filter(|interest| interest.property_id == property.id)
            .collect();

        let total_views = records.len();
        let count_level = |level: InterestLevel| {
            records
                .iter()
                .filter(|interest| interest.interest_level == level)
                .count()
        };
        let interested_count = count_level(InterestLevel::Interested);
        let very_interested_count = count_level(InterestLevel::VeryInterested);

        let match_scores: Vec<f64> = records
            .iter()
            .filter_map(|interest| investors.get(&interest.investor_id))
            .map(|investor| calculate_match_score(property, &investor.preferences))
            .collect();

        PropertyAnalytics {
            property_id: property.id,
            total_views,
            interested_count,
            very_interested_count,
            interest_rate: rate(interested_count, total_views),
            very_interest_rate: rate(very_interested_count, total_views),
            bmv_score: calculate_bmv_score(property),
            avg_match_score: mean(&match_scores),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(2)
    }
}

#[inline]
fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[inline]
fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

#[inline]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn create_candidate(id: PropertyId, price: Decimal, region: &str, net_yield: f64) -> PropertyCandidate {
        PropertyCandidate {
            id,
            title: format!("Property {}", id),
            location: Some("Manchester".to_string()),
            market_value: Some(price * dec!(1.1)),
            asking_price: Some(price),
            location_score: Some(12.0),
            condition_score: Some(8.0),
            net_yield: Some(net_yield),
            roi_potential: Some(5.0),
            region: Some(region.to_string()),
            property_type: Some("terraced".to_string()),
            investment_strategy: None,
            images: vec![format!("https://cdn.example.com/{}.jpg", id)],
        }
    }

    fn create_preferences() -> InvestorPreferences {
        InvestorPreferences {
            min_investment: Some(dec!(100000)),
            max_investment: Some(dec!(300000)),
            target_regions: vec!["north_west".to_string()],
            property_types: vec!["terraced".to_string()],
            min_yield: Some(5.0),
            investment_strategy: None,
        }
    }

    fn create_interest(investor_id: InvestorId, property_id: PropertyId, level: InterestLevel) -> DealInterest {
        DealInterest {
            investor_id,
            property_id,
            interest_level: level,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_filters_hard_constraints() {
        let matcher = Matcher::default();

        let candidates = vec![
            create_candidate(1, dec!(200000), "north_west", 7.0), // Match
            create_candidate(2, dec!(50000), "north_west", 7.0),  // Under budget
            create_candidate(3, dec!(200000), "london", 7.0),     // Wrong region
            create_candidate(4, dec!(200000), "north_west", 3.0), // Yield too low
        ];

        let ranking = matcher.rank_properties_for_investor(&create_preferences(), candidates, 10);

        assert_eq!(ranking.total_candidates, 4);
        assert_eq!(ranking.matches.len(), 1);
        assert_eq!(ranking.matches[0].property.id, 1);
    }

    #[test]
    fn test_rank_sorted_by_total_score() {
        let matcher = Matcher::default();

        let candidates = vec![
            create_candidate(1, dec!(290000), "north_west", 5.5), // Budget edge, low yield tier
            create_candidate(2, dec!(200000), "north_west", 9.0), // Budget centre, top yield tier
        ];

        let ranking = matcher.rank_properties_for_investor(&create_preferences(), candidates, 10);

        assert_eq!(ranking.matches[0].property.id, 2);
        assert!(ranking.matches[0].total_score >= ranking.matches[1].total_score);
        let first = &ranking.matches[0];
        assert_eq!(first.total_score, (first.match_score + first.bmv_score) / 2.0);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let matcher = Matcher::default();

        let candidates: Vec<PropertyCandidate> = [5, 3, 9, 1]
            .into_iter()
            .map(|id| create_candidate(id, dec!(200000), "north_west", 7.0))
            .collect();

        let ranking = matcher.rank_properties_for_investor(&create_preferences(), candidates, 10);
        let ids: Vec<PropertyId> = ranking.matches.iter().map(|m| m.property.id).collect();

        assert_eq!(ids, vec![5, 3, 9, 1]);
    }

    #[test]
    fn test_rank_respects_limit() {
        let matcher = Matcher::default();

        let candidates: Vec<PropertyCandidate> = (0..20)
            .map(|i| create_candidate(i, dec!(150000) + Decimal::from(i * 1000), "north_west", 7.0))
            .collect();

        let ranking = matcher.rank_properties_for_investor(&create_preferences(), candidates, 5);

        assert_eq!(ranking.matches.len(), 5);
        assert_eq!(ranking.total_candidates, 20);
    }

    #[test]
    fn test_recommend_skips_engaged() {
        let matcher = Matcher::default();

        let candidates = vec![
            create_candidate(1, dec!(200000), "north_west", 9.0), // Best, but already seen
            create_candidate(2, dec!(210000), "north_west", 7.0),
            create_candidate(3, dec!(220000), "north_west", 6.5),
        ];
        let engaged = HashSet::from([1]);

        let recommendations =
            matcher.recommend_for_investor(&create_preferences(), candidates, &engaged, 5);

        assert!(recommendations.iter().all(|r| r.property_id != 1));
        assert_eq!(recommendations.len(), 2);
        assert_eq!(
            recommendations[0].image_url.as_deref(),
            Some("https://cdn.example.com/2.jpg")
        );
    }

    #[test]
    fn test_recommend_deduplicates_and_limits() {
        let matcher = Matcher::default();

        let candidates = vec![
            create_candidate(1, dec!(200000), "north_west", 7.0),
            create_candidate(1, dec!(200000), "north_west", 7.0),
            create_candidate(2, dec!(200000), "north_west", 7.0),
            create_candidate(3, dec!(200000), "north_west", 7.0),
        ];

        let recommendations =
            matcher.recommend_for_investor(&create_preferences(), candidates, &HashSet::new(), 2);

        let ids: Vec<PropertyId> = recommendations.iter().map(|r| r.property_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_recommend_oversamples_only_limit_times_factor() {
        let matcher = Matcher::new(2);

        // Four equally scored candidates; the first two are engaged. With a
        // limit of one the oversampled pool holds ids 1 and 2 only.
        let candidates: Vec<PropertyCandidate> = (1..=4)
            .map(|id| create_candidate(id, dec!(200000), "north_west", 7.0))
            .collect();
        let engaged = HashSet::from([1, 2]);

        let recommendations =
            matcher.recommend_for_investor(&create_preferences(), candidates, &engaged, 1);

        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_match_property_to_investors() {
        let matcher = Matcher::default();
        let property = create_candidate(1, dec!(200000), "north_west", 7.0);

        let investors = vec![
            InvestorProfile {
                id: 10,
                name: "Loose".to_string(),
                preferences: InvestorPreferences::default(),
            },
            InvestorProfile {
                id: 11,
                name: "Targeted".to_string(),
                preferences: create_preferences(),
            },
            InvestorProfile {
                id: 12,
                name: "London only".to_string(),
                preferences: InvestorPreferences {
                    target_regions: vec!["london".to_string()],
                    ..Default::default()
                },
            },
        ];

        let matches = matcher.match_property_to_investors(&property, investors, 10);

        let ids: Vec<InvestorId> = matches.iter().map(|m| m.investor_id).collect();
        assert_eq!(ids, vec![11, 10]);
        assert_eq!(matches[1].match_score, 0.0);
    }

    #[test]
    fn test_property_analytics() {
        let matcher = Matcher::default();
        let property = create_candidate(1, dec!(200000), "north_west", 7.0);

        let interests = vec![
            create_interest(10, 1, InterestLevel::Interested),
            create_interest(11, 1, InterestLevel::VeryInterested),
            create_interest(12, 1, InterestLevel::Viewed),
            create_interest(13, 1, InterestLevel::Interested),
            create_interest(10, 2, InterestLevel::Interested), // Other property
        ];
        let investors = HashMap::from([
            (
                10,
                InvestorProfile {
                    id: 10,
                    name: "A".to_string(),
                    preferences: create_preferences(),
                },
            ),
            (
                11,
                InvestorProfile {
                    id: 11,
                    name: "B".to_string(),
                    preferences: InvestorPreferences::default(),
                },
            ),
        ]);

        let analytics = matcher.property_analytics(&property, &interests, &investors);

        assert_eq!(analytics.total_views, 4);
        assert_eq!(analytics.interested_count, 2);
        assert_eq!(analytics.very_interested_count, 1);
        assert_eq!(analytics.interest_rate, 50.0);
        assert_eq!(analytics.very_interest_rate, 25.0);
        assert_eq!(analytics.bmv_score, calculate_bmv_score(&property));

        let expected = (calculate_match_score(&property, &create_preferences()) + 0.0) / 2.0;
        assert!((analytics.avg_match_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_property_analytics_without_interest() {
        let matcher = Matcher::default();
        let property = create_candidate(1, dec!(200000), "north_west", 7.0);

        let analytics = matcher.property_analytics(&property, &[], &HashMap::new());

        assert_eq!(analytics.total_views, 0);
        assert_eq!(analytics.interest_rate, 0.0);
        assert_eq!(analytics.avg_match_score, 0.0);
    }
}
