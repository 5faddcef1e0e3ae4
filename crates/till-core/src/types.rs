//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  CatalogItem    │   │  PricingRule    │   (external sources)        │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  code           │   │  type (tag)     │                             │
//! │  │  name           │   │  code           │                             │
//! │  │  price          │   │  enabled        │                             │
//! │  └────────┬────────┘   └────────┬────────┘                             │
//! │           │      cart qty       │                                       │
//! │           └──────────┬──────────┘                                       │
//! │                      ▼                                                  │
//! │             ┌─────────────────┐         ┌──────────────────┐           │
//! │             │    LineItem     │ ──────► │ CheckoutSummary  │           │
//! │             │  (per total())  │         │ subtotal/total   │           │
//! │             └─────────────────┘         └──────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Catalog Item
// =============================================================================

/// An item's current name and price as reported by the price source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogItem {
    /// Item code (business identifier, e.g. "APE").
    pub code: String,

    /// Display name.
    pub name: String,

    /// Current unit price.
    pub price: Money,
}

impl CatalogItem {
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        CatalogItem {
            code: code.into(),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// A named discount policy scoped to one item code.
///
/// At most one rule exists per `(rule_type, code)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PricingRule {
    /// Tag selecting the discount handler ("three-for-two", "bulk", ...).
    #[serde(rename = "type")]
    pub rule_type: String,

    /// Item code the rule applies to.
    pub code: String,

    /// Disabled rules are kept in the rule table but never discount.
    pub enabled: bool,
}

impl PricingRule {
    pub fn new(rule_type: impl Into<String>, code: impl Into<String>, enabled: bool) -> Self {
        PricingRule {
            rule_type: rule_type.into(),
            code: code.into(),
            enabled,
        }
    }

    /// Whether a rule source should return this rule for the requested codes.
    ///
    /// ## Filter Contract
    /// ```text
    /// codes empty      → every rule, enabled or not
    /// codes non-empty  → enabled rules whose code was requested
    /// ```
    ///
    /// The asymmetry is deliberate: an unfiltered listing is an admin view of
    /// the whole rule table, a filtered one is what checkout consumes.
    pub fn matches_filter(&self, codes: &[String]) -> bool {
        if codes.is_empty() {
            return true;
        }
        self.enabled && codes.iter().any(|c| c == &self.code)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// The per-code join of cart quantity, catalog price and applicable rules.
///
/// Built once per `total()` call, discounted in place by
/// [`DiscountRegistry::resolve`](crate::discount::DiscountRegistry::resolve),
/// then summed and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub code: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,

    /// Best discount found so far. Always within `[0, line_total]`.
    pub discount: Money,

    /// Rules for this code, in the order the rule source returned them.
    pub rules: Vec<PricingRule>,
}

impl LineItem {
    /// Joins a catalog entry with its cart quantity and rules.
    pub fn new(item: CatalogItem, quantity: u32, rules: Vec<PricingRule>) -> Self {
        LineItem {
            code: item.code,
            name: item.name,
            unit_price: item.price,
            quantity,
            discount: Money::zero(),
            rules,
        }
    }

    /// Unit price × quantity, before discount. Saturates when out of range.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, or `LineOverflow` when it does not fit.
    pub fn checked_line_total(&self) -> CoreResult<Money> {
        self.unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| CoreError::LineOverflow {
                code: self.code.clone(),
            })
    }

    /// Line total minus the resolved discount.
    #[inline]
    pub fn net_total(&self) -> Money {
        self.line_total() - self.discount
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// Priced view of a cart: every line plus the aggregate figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub lines: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

impl CheckoutSummary {
    /// Summary of a cart with nothing to price.
    pub fn empty() -> Self {
        CheckoutSummary {
            lines: Vec::new(),
            subtotal: Money::zero(),
            discount: Money::zero(),
            total: Money::zero(),
        }
    }

    /// Aggregates resolved line items. No lines sums to zero.
    ///
    /// Fails when a line total or the subtotal does not fit in i64 cents.
    pub fn from_lines(lines: Vec<LineItem>) -> CoreResult<Self> {
        let mut subtotal = Money::zero();
        let mut discount = Money::zero();

        for line in &lines {
            subtotal = subtotal
                .checked_add(line.checked_line_total()?)
                .ok_or(CoreError::TotalOverflow)?;
            // Each discount is at most its line total, so this cannot overflow
            // once the subtotal fits.
            discount = discount
                .checked_add(line.discount)
                .ok_or(CoreError::TotalOverflow)?;
        }

        Ok(CheckoutSummary {
            lines,
            subtotal,
            discount,
            total: subtotal - discount,
        })
    }

    /// Looks up the line for an item code.
    pub fn line(&self, code: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.code == code)
    }
}

impl Default for CheckoutSummary {
    fn default() -> Self {
        CheckoutSummary::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_rule_filter_with_codes_requires_enabled() {
        let enabled = PricingRule::new("bulk", "PUNK", true);
        let disabled = PricingRule::new("bulk", "PUNK", false);

        assert!(enabled.matches_filter(&codes(&["PUNK"])));
        assert!(!disabled.matches_filter(&codes(&["PUNK"])));
        assert!(!enabled.matches_filter(&codes(&["APE"])));
    }

    #[test]
    fn test_rule_filter_without_codes_returns_everything() {
        let disabled = PricingRule::new("bulk", "PUNK", false);
        assert!(disabled.matches_filter(&[]));
    }

    #[test]
    fn test_pricing_rule_serializes_type_tag() {
        let rule = PricingRule::new("three-for-two", "APE", true);
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["type"], "three-for-two");
        assert_eq!(json["code"], "APE");
        assert_eq!(json["enabled"], true);
    }

    #[test]
    fn test_line_item_totals() {
        let item = CatalogItem::new("APE", "Bored Apes", Money::from_major_minor(75, 0));
        let mut line = LineItem::new(item, 3, Vec::new());
        assert_eq!(line.line_total(), Money::from_major_minor(225, 0));
        assert_eq!(line.net_total(), Money::from_major_minor(225, 0));

        line.discount = Money::from_major_minor(75, 0);
        assert_eq!(line.net_total(), Money::from_major_minor(150, 0));
    }

    #[test]
    fn test_summary_from_no_lines_is_zero() {
        let summary = CheckoutSummary::from_lines(Vec::new()).unwrap();
        assert_eq!(summary, CheckoutSummary::empty());
        assert_eq!(summary.total, Money::zero());
    }

    #[test]
    fn test_summary_aggregates_lines() {
        let mut ape = LineItem::new(
            CatalogItem::new("APE", "Bored Apes", Money::from_cents(7500)),
            2,
            Vec::new(),
        );
        ape.discount = Money::from_cents(7500);
        let punk = LineItem::new(
            CatalogItem::new("PUNK", "Crypto Punks", Money::from_cents(6000)),
            1,
            Vec::new(),
        );

        let summary = CheckoutSummary::from_lines(vec![ape, punk]).unwrap();
        assert_eq!(summary.subtotal.cents(), 21000);
        assert_eq!(summary.discount.cents(), 7500);
        assert_eq!(summary.total.cents(), 13500);
        assert_eq!(summary.line("PUNK").map(|l| l.quantity), Some(1));
        assert!(summary.line("MEEBIT").is_none());
    }

    #[test]
    fn test_line_total_out_of_range() {
        let gem = LineItem::new(
            CatalogItem::new("GEM", "Gem", Money::from_cents(4_000_000_000_000_000_000)),
            3,
            Vec::new(),
        );

        assert!(matches!(
            gem.checked_line_total(),
            Err(CoreError::LineOverflow { ref code }) if code == "GEM"
        ));
        assert!(matches!(
            CheckoutSummary::from_lines(vec![gem]),
            Err(CoreError::LineOverflow { .. })
        ));
    }

    #[test]
    fn test_subtotal_out_of_range() {
        let line = |code: &str| {
            LineItem::new(
                CatalogItem::new(code, code, Money::from_cents(4_000_000_000_000_000_000)),
                2,
                Vec::new(),
            )
        };

        assert!(matches!(
            CheckoutSummary::from_lines(vec![line("GEM"), line("RUBY")]),
            Err(CoreError::TotalOverflow)
        ));
    }
}
