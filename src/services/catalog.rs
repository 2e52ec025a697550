use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::core::calculate_basic_from;
use crate::models::{
    DealInterest, FinancialInputs, InterestLevel, InvestorId, InvestorProfile, PropertyCandidate,
    PropertyId,
};

/// Errors that can occur when reading or updating the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Property as stored in a seed file, optionally with its raw financials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(flatten)]
    pub property: PropertyCandidate,
    #[serde(default)]
    pub financials: Option<FinancialInputs>,
}

/// Seed data for the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
    #[serde(default)]
    pub investors: Vec<InvestorProfile>,
    #[serde(default)]
    pub interests: Vec<DealInterest>,
}

/// In-process store of published properties, investors and their activity
///
/// Stands in for the persistence layer and the activity log. The matching
/// core never sees this type; callers copy what they need out of it.
#[derive(Debug, Default)]
pub struct Catalog {
    properties: RwLock<Vec<PropertyCandidate>>,
    investors: RwLock<BTreeMap<InvestorId, InvestorProfile>>,
    interests: RwLock<Vec<DealInterest>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from seed data
    ///
    /// Properties without a stored net yield get one derived from their
    /// financials through the basic metrics calculator.
    pub fn from_seed(seed: CatalogSeed) -> Self {
        let properties = seed
            .properties
            .into_iter()
            .map(|record| {
                let mut property = record.property;
                if property.net_yield.is_none() {
                    if let Some(financials) = record.financials.as_ref() {
                        let metrics = calculate_basic_from(financials);
                        if !metrics.annual_rent.is_zero() {
                            property.net_yield = metrics.net_yield.to_f64();
                        }
                    }
                }
                property
            })
            .collect();

        let investors = seed
            .investors
            .into_iter()
            .map(|investor| (investor.id, investor))
            .collect();

        Self {
            properties: RwLock::new(properties),
            investors: RwLock::new(investors),
            interests: RwLock::new(seed.interests),
        }
    }

    /// Load a catalog from a JSON seed file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let seed: CatalogSeed = serde_json::from_str(&raw)?;

        tracing::info!(
            "Loaded catalog from {}: {} properties, {} investors, {} interests",
            path.as_ref().display(),
            seed.properties.len(),
            seed.investors.len(),
            seed.interests.len()
        );

        Ok(Self::from_seed(seed))
    }

    /// All published properties, in catalog order
    pub async fn properties(&self) -> Vec<PropertyCandidate> {
        self.properties.read().await.clone()
    }

    pub async fn property(&self, property_id: PropertyId) -> Result<PropertyCandidate, CatalogError> {
        self.properties
            .read()
            .await
            .iter()
            .find(|p| p.id == property_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("property {}", property_id)))
    }

    pub async fn investor(&self, investor_id: InvestorId) -> Option<InvestorProfile> {
        self.investors.read().await.get(&investor_id).cloned()
    }

    /// All investors, ordered by id
    pub async fn investors(&self) -> Vec<InvestorProfile> {
        self.investors.read().await.values().cloned().collect()
    }

    pub async fn investors_by_id(&self) -> HashMap<InvestorId, InvestorProfile> {
        self.investors
            .read()
            .await
            .iter()
            .map(|(id, investor)| (*id, investor.clone()))
            .collect()
    }

    /// Properties the investor has viewed, saved or expressed interest in
    pub async fn engaged_properties(&self, investor_id: InvestorId) -> HashSet<PropertyId> {
        self.interests
            .read()
            .await
            .iter()
            .filter(|interest| interest.investor_id == investor_id)
            .map(|interest| interest.property_id)
            .collect()
    }

    pub async fn interests_for_property(&self, property_id: PropertyId) -> Vec<DealInterest> {
        self.interests
            .read()
            .await
            .iter()
            .filter(|interest| interest.property_id == property_id)
            .cloned()
            .collect()
    }

    /// Record or update an investor's interest in a property
    ///
    /// Returns the stored record and whether it was newly created.
    pub async fn record_interest(
        &self,
        investor_id: InvestorId,
        property_id: PropertyId,
        interest_level: InterestLevel,
    ) -> Result<(DealInterest, bool), CatalogError> {
        if self.investor(investor_id).await.is_none() {
            return Err(CatalogError::NotFound(format!("investor {}", investor_id)));
        }
        self.property(property_id).await?;

        let mut interests = self.interests.write().await;

        if let Some(existing) = interests
            .iter_mut()
            .find(|i| i.investor_id == investor_id && i.property_id == property_id)
        {
            existing.interest_level = interest_level;
            existing.updated_at = Utc::now();
            return Ok((existing.clone(), false));
        }

        let interest = DealInterest {
            investor_id,
            property_id,
            interest_level,
            updated_at: Utc::now(),
        };
        interests.push(interest.clone());

        Ok((interest, true))
    }

    /// Number of properties and investors held
    pub async fn counts(&self) -> (usize, usize) {
        (
            self.properties.read().await.len(),
            self.investors.read().await.len(),
        )
    }
}
