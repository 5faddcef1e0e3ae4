//! # Checkout Engine
//!
//! Owns one cart and prices it against the configured sources.
//!
//! ## Total Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  summary()                                                              │
//! │    │                                                                    │
//! │    ├── cart empty? ──► CheckoutSummary::empty()  (no provider calls)   │
//! │    │                                                                    │
//! │    ├── codes = cart.codes()          (quantity 0 codes included)       │
//! │    ├── rules  = RuleProvider::get_rules_by_code(codes)                  │
//! │    ├── prices = PriceProvider::get_items(codes)                         │
//! │    │                                                                    │
//! │    ├── one LineItem per catalog entry present in the cart              │
//! │    │     (cart codes missing from the catalog are dropped)             │
//! │    ├── DiscountRegistry::resolve_all(lines)   best discount per line   │
//! │    └── CheckoutSummary::from_lines(lines)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One engine serves one session. `scan`/`remove` take `&mut self`, so the
//! borrow checker serializes mutation against an in-flight total.

use std::collections::HashSet;
use std::sync::Arc;

use till_core::{Cart, CheckoutSummary, DiscountRegistry, LineItem, Money};
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, CheckoutResult};
use crate::provider::{PriceProvider, RuleProvider};

/// A cart plus everything needed to price it.
pub struct CheckoutEngine {
    cart: Cart,
    prices: Arc<dyn PriceProvider>,
    rules: Arc<dyn RuleProvider>,
    registry: Arc<DiscountRegistry>,
}

impl CheckoutEngine {
    /// Creates an engine with the built-in `three-for-two` and `bulk` rules.
    pub fn new(prices: Arc<dyn PriceProvider>, rules: Arc<dyn RuleProvider>) -> Self {
        CheckoutEngine::with_registry(prices, rules, Arc::new(DiscountRegistry::with_defaults()))
    }

    /// Creates an engine with a caller-supplied registry.
    pub fn with_registry(
        prices: Arc<dyn PriceProvider>,
        rules: Arc<dyn RuleProvider>,
        registry: Arc<DiscountRegistry>,
    ) -> Self {
        CheckoutEngine {
            cart: Cart::new(),
            prices,
            rules,
            registry,
        }
    }

    /// Adds one unit of `code` to the cart.
    pub fn scan(&mut self, code: &str) {
        self.cart.scan(code);
        debug!(code, quantity = ?self.cart.quantity(code), "Scanned");
    }

    /// Removes one unit of `code` if the cart holds any.
    pub fn remove(&mut self, code: &str) {
        self.cart.remove(code);
        debug!(code, quantity = ?self.cart.quantity(code), "Removed");
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn registry(&self) -> &DiscountRegistry {
        &self.registry
    }

    /// Prices the cart line by line.
    ///
    /// ## Errors
    /// - [`CheckoutError::ProviderUnavailable`] if either source fails
    /// - [`CheckoutError::Configuration`] if an enabled rule has no handler
    pub async fn summary(&self) -> CheckoutResult<CheckoutSummary> {
        if self.cart.is_empty() {
            return Ok(CheckoutSummary::empty());
        }

        let codes = self.cart.codes();

        let mut rules_by_code = self
            .rules
            .get_rules_by_code(&codes)
            .await
            .map_err(CheckoutError::rules)?;

        let items = self
            .prices
            .get_items(&codes)
            .await
            .map_err(CheckoutError::prices)?;

        let mut priced: HashSet<String> = HashSet::with_capacity(items.len());
        let mut lines: Vec<LineItem> = Vec::with_capacity(items.len());

        for item in items {
            let Some(quantity) = self.cart.quantity(&item.code) else {
                continue;
            };
            if !priced.insert(item.code.clone()) {
                continue;
            }
            let rules = rules_by_code.remove(&item.code).unwrap_or_default();
            lines.push(LineItem::new(item, quantity, rules));
        }

        for code in codes.iter().filter(|c| !priced.contains(*c)) {
            warn!(code = %code, "Item not in catalog, excluded from total");
        }

        self.registry.resolve_all(&mut lines)?;

        let summary = CheckoutSummary::from_lines(lines)?;
        info!(
            lines = summary.lines.len(),
            subtotal = %summary.subtotal,
            discount = %summary.discount,
            total = %summary.total,
            "Cart totalled"
        );

        Ok(summary)
    }

    /// Sum over every line of `price × qty − discount`.
    pub async fn total(&self) -> CheckoutResult<Money> {
        Ok(self.summary().await?.total)
    }
}

impl std::fmt::Debug for CheckoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutEngine")
            .field("cart", &self.cart)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
