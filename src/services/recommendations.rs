use std::sync::Arc;

use crate::core::{Matcher, Ranking};
use crate::models::{InvestorId, InvestorMatch, PropertyAnalytics, PropertyId, Recommendation};
use crate::services::catalog::{Catalog, CatalogError};

/// Resolves ids against the catalog and hands plain data to the matcher
#[derive(Debug, Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    matcher: Matcher,
}

impl RecommendationService {
    pub fn new(catalog: Arc<Catalog>, matcher: Matcher) -> Self {
        Self { catalog, matcher }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Rank every published property for an investor
    pub async fn rank_for_investor(
        &self,
        investor_id: InvestorId,
        limit: usize,
    ) -> Result<Ranking, CatalogError> {
        let investor = self
            .catalog
            .investor(investor_id)
            .await
            .ok_or_else(|| CatalogError::NotFound(format!("investor {}", investor_id)))?;
        let candidates = self.catalog.properties().await;

        Ok(self
            .matcher
            .rank_properties_for_investor(&investor.preferences, candidates, limit))
    }

    /// Recommend properties the investor has not engaged with yet
    ///
    /// An unknown investor gets no recommendations.
    pub async fn recommend_for_investor(
        &self,
        investor_id: InvestorId,
        limit: usize,
    ) -> Vec<Recommendation> {
        let Some(investor) = self.catalog.investor(investor_id).await else {
            tracing::debug!("No investor {}, returning no recommendations", investor_id);
            return Vec::new();
        };

        let candidates = self.catalog.properties().await;
        let engaged = self.catalog.engaged_properties(investor_id).await;

        tracing::debug!(
            "Excluding {} engaged properties for investor {}",
            engaged.len(),
            investor_id
        );

        self.matcher
            .recommend_for_investor(&investor.preferences, candidates, &engaged, limit)
    }

    /// Rank investors for a property, e.g. when its deal is published
    pub async fn investors_for_property(
        &self,
        property_id: PropertyId,
        limit: usize,
    ) -> Result<Vec<InvestorMatch>, CatalogError> {
        let property = self.catalog.property(property_id).await?;
        let investors = self.catalog.investors().await;

        Ok(self
            .matcher
            .match_property_to_investors(&property, investors, limit))
    }

    pub async fn property_analytics(
        &self,
        property_id: PropertyId,
    ) -> Result<PropertyAnalytics, CatalogError> {
        let property = self.catalog.property(property_id).await?;
        let interests = self.catalog.interests_for_property(property_id).await;
        let investors = self.catalog.investors_by_id().await;

        Ok(self
            .matcher
            .property_analytics(&property, &interests, &investors))
    }
}
