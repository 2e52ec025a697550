// Service exports
pub mod catalog;
pub mod recommendations;

pub use catalog::{Catalog, CatalogError, CatalogSeed, PropertyRecord};
pub use recommendations::RecommendationService;
