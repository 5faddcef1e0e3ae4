//! # Price and Rule Providers
//!
//! The two external collaborators a checkout total depends on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutEngine                                                         │
//! │     │                                                                   │
//! │     ├── RuleProvider::get_rules_by_code(codes)                          │
//! │     │        ├── InMemoryRules   (reference data, tests)               │
//! │     │        └── SqliteRules     (till-db pricing_rules table)         │
//! │     │                                                                   │
//! │     └── PriceProvider::get_items(codes)                                 │
//! │              ├── InMemoryCatalog (reference data, tests)               │
//! │              └── SqliteCatalog   (till-db catalog_items table)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls are async: a provider may sit on a database or a remote service.
//! Implementations never retry; a failure aborts the whole total.

pub mod memory;
pub mod sqlite;

use std::collections::HashMap;

use async_trait::async_trait;
use till_core::{CatalogItem, PricingRule};

use crate::error::ProviderError;

pub use memory::{InMemoryCatalog, InMemoryRules};
pub use sqlite::{SqliteCatalog, SqliteRules};

/// Rules grouped by the item code they apply to.
pub type RulesByCode = HashMap<String, Vec<PricingRule>>;

/// Read-only lookup of item code → current name and price.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Returns every known item when `codes` is empty, otherwise only items
    /// whose code is in `codes`. Order is up to the provider.
    async fn get_items(&self, codes: &[String]) -> Result<Vec<CatalogItem>, ProviderError>;
}

/// Read-only lookup of item code → pricing rules.
#[async_trait]
pub trait RuleProvider: Send + Sync {
    /// Returns rules per [`PricingRule::matches_filter`]: everything for an
    /// empty `codes`, enabled rules for the requested codes otherwise.
    async fn get_rules(&self, codes: &[String]) -> Result<Vec<PricingRule>, ProviderError>;

    /// [`get_rules`](Self::get_rules) grouped by code, keeping source order
    /// within each group.
    async fn get_rules_by_code(&self, codes: &[String]) -> Result<RulesByCode, ProviderError> {
        let rules = self.get_rules(codes).await?;
        Ok(group_by_code(rules))
    }
}

/// Groups rules by code, preserving their relative order.
pub fn group_by_code(rules: Vec<PricingRule>) -> RulesByCode {
    let mut grouped = RulesByCode::new();
    for rule in rules {
        grouped.entry(rule.code.clone()).or_default().push(rule);
    }
    grouped
}
