//! Providers backed by the till-db SQLite repositories.

use async_trait::async_trait;
use till_core::{CatalogItem, PricingRule};
use till_db::{CatalogRepository, Database, RuleRepository};

use super::{PriceProvider, RuleProvider};
use crate::error::ProviderError;

/// Price source reading the `catalog_items` table.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    repo: CatalogRepository,
}

impl SqliteCatalog {
    pub fn new(db: &Database) -> Self {
        SqliteCatalog { repo: db.catalog() }
    }
}

#[async_trait]
impl PriceProvider for SqliteCatalog {
    async fn get_items(&self, codes: &[String]) -> Result<Vec<CatalogItem>, ProviderError> {
        Ok(self.repo.list(codes).await?)
    }
}

/// Rule source reading the `pricing_rules` table.
#[derive(Debug, Clone)]
pub struct SqliteRules {
    repo: RuleRepository,
}

impl SqliteRules {
    pub fn new(db: &Database) -> Self {
        SqliteRules { repo: db.rules() }
    }
}

#[async_trait]
impl RuleProvider for SqliteRules {
    async fn get_rules(&self, codes: &[String]) -> Result<Vec<PricingRule>, ProviderError> {
        Ok(self.repo.list(codes).await?)
    }
}
