//! In-memory providers backed by plain vectors.

use async_trait::async_trait;
use till_core::{CatalogItem, PricingRule};

use super::{PriceProvider, RuleProvider};
use crate::error::ProviderError;

/// Price source holding a fixed list of items.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<CatalogItem>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        InMemoryCatalog { items }
    }

    /// APE, PUNK, AZUKI and MEEBIT at their launch prices.
    pub fn reference() -> Self {
        InMemoryCatalog::new(till_db::reference::catalog())
    }
}

#[async_trait]
impl PriceProvider for InMemoryCatalog {
    async fn get_items(&self, codes: &[String]) -> Result<Vec<CatalogItem>, ProviderError> {
        Ok(self
            .items
            .iter()
            .filter(|item| codes.is_empty() || codes.contains(&item.code))
            .cloned()
            .collect())
    }
}

/// Rule source holding a fixed list of rules.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRules {
    rules: Vec<PricingRule>,
}

impl InMemoryRules {
    pub fn new(rules: Vec<PricingRule>) -> Self {
        InMemoryRules { rules }
    }

    /// three-for-two on APE and AZUKI, bulk on PUNK and AZUKI.
    pub fn reference() -> Self {
        InMemoryRules::new(till_db::reference::rules())
    }
}

#[async_trait]
impl RuleProvider for InMemoryRules {
    async fn get_rules(&self, codes: &[String]) -> Result<Vec<PricingRule>, ProviderError> {
        Ok(self
            .rules
            .iter()
            .filter(|rule| rule.matches_filter(codes))
            .cloned()
            .collect())
    }
}
