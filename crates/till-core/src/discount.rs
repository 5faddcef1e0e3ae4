//! # Discount Rules
//!
//! Maps a pricing rule's type tag to the logic that computes a discount for
//! one line item, and resolves the best discount per line.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem AZUKI × 3 @ $30.00   rules: [three-for-two, bulk]             │
//! │                                                                         │
//! │  three-for-two ──► floor(3/2) × $30.00 = $30.00   ◄── kept (largest)    │
//! │  bulk          ──► 3 × $30.00 × 20%    = $18.00                         │
//! │                                                                         │
//! │  discount = $30.00   net = $90.00 − $30.00 = $60.00                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - Rules are evaluated in the order the rule source returned them.
//! - The largest discount wins; on a tie the first one seen is kept.
//! - A zero result never replaces an earlier non-zero one.
//! - A tag with no registered handler is a [`CoreError::UnknownRuleType`].
//!
//! Adding a rule type means implementing [`DiscountRule`] and registering
//! it; the resolution loop never changes.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percentage};
use crate::types::LineItem;
use crate::{BULK_DISCOUNT_BPS, BULK_MIN_QUANTITY, RULE_BULK, RULE_THREE_FOR_TWO};

// =============================================================================
// Line Quote
// =============================================================================

/// The part of a line item a discount rule is allowed to see.
///
/// Handlers get price and quantity only, never the line's rules or its
/// running discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineQuote {
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineQuote {
    pub const fn new(unit_price: Money, quantity: u32) -> Self {
        LineQuote {
            unit_price,
            quantity,
        }
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

impl From<&LineItem> for LineQuote {
    fn from(line: &LineItem) -> Self {
        LineQuote::new(line.unit_price, line.quantity)
    }
}

// =============================================================================
// Discount Rule Trait
// =============================================================================

/// Discount logic for one rule type.
pub trait DiscountRule: Send + Sync {
    /// Tag this handler answers to in the rule table.
    fn rule_type(&self) -> &str;

    /// Discount for the quoted line. Must be pure and non-negative.
    fn discount(&self, quote: &LineQuote) -> Money;
}

// =============================================================================
// Built-in Rules
// =============================================================================

/// `three-for-two`: one free unit for every complete pair.
///
/// Despite the name this is `floor(qty / 2) × price`, i.e. one free unit per
/// two owned. Three units get one free, four units get two free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeForTwo;

impl DiscountRule for ThreeForTwo {
    fn rule_type(&self) -> &str {
        RULE_THREE_FOR_TWO
    }

    fn discount(&self, quote: &LineQuote) -> Money {
        if quote.quantity < 2 {
            return Money::zero();
        }
        quote.unit_price.multiply_quantity(quote.quantity / 2)
    }
}

/// `bulk`: a flat rate off every unit once a quantity threshold is met.
#[derive(Debug, Clone, Copy)]
pub struct Bulk {
    min_quantity: u32,
    rate: Percentage,
}

impl Bulk {
    pub const fn new(min_quantity: u32, rate: Percentage) -> Self {
        Bulk { min_quantity, rate }
    }
}

impl Default for Bulk {
    /// 20% off from 3 units.
    fn default() -> Self {
        Bulk::new(BULK_MIN_QUANTITY, Percentage::from_bps(BULK_DISCOUNT_BPS))
    }
}

impl DiscountRule for Bulk {
    fn rule_type(&self) -> &str {
        RULE_BULK
    }

    fn discount(&self, quote: &LineQuote) -> Money {
        if quote.quantity < self.min_quantity {
            return Money::zero();
        }
        quote.line_total().percentage_of(self.rate)
    }
}

// =============================================================================
// Discount Registry
// =============================================================================

/// Lookup from rule type tag to its discount logic.
///
/// Built once, then shared read-only by the checkout engine.
#[derive(Default)]
pub struct DiscountRegistry {
    rules: HashMap<String, Box<dyn DiscountRule>>,
}

impl DiscountRegistry {
    /// Creates a registry with no handlers.
    pub fn new() -> Self {
        DiscountRegistry::default()
    }

    /// Creates a registry holding the built-in `three-for-two` and `bulk` rules.
    pub fn with_defaults() -> Self {
        let mut registry = DiscountRegistry::new();
        registry.rules.insert(RULE_THREE_FOR_TWO.to_string(), Box::new(ThreeForTwo));
        registry.rules.insert(RULE_BULK.to_string(), Box::new(Bulk::default()));
        registry
    }

    /// Registers a handler under its own tag.
    ///
    /// ## Errors
    /// [`CoreError::DuplicateRuleType`] if the tag is already taken.
    pub fn register<R>(&mut self, rule: R) -> CoreResult<()>
    where
        R: DiscountRule + 'static,
    {
        let tag = rule.rule_type().to_string();
        if self.rules.contains_key(&tag) {
            return Err(CoreError::DuplicateRuleType(tag));
        }

        debug!(rule_type = %tag, "Registered discount rule");
        self.rules.insert(tag, Box::new(rule));
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_rule<R>(mut self, rule: R) -> CoreResult<Self>
    where
        R: DiscountRule + 'static,
    {
        self.register(rule)?;
        Ok(self)
    }

    /// Whether a handler exists for `rule_type`.
    pub fn contains(&self, rule_type: &str) -> bool {
        self.rules.contains_key(rule_type)
    }

    /// Registered tags, sorted.
    pub fn rule_types(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Evaluates a single rule type against a quote.
    ///
    /// Returns `None` when no handler is registered for `rule_type`.
    pub fn evaluate(&self, rule_type: &str, quote: &LineQuote) -> Option<Money> {
        self.rules
            .get(rule_type)
            .map(|rule| rule.discount(quote).clamp_between(Money::zero(), quote.line_total()))
    }

    /// Resolves the best discount for one line item, in place.
    ///
    /// ## Errors
    /// [`CoreError::UnknownRuleType`] when an enabled rule has no handler.
    /// [`CoreError::LineOverflow`] when price × quantity does not fit in i64.
    pub fn resolve(&self, line: &mut LineItem) -> CoreResult<()> {
        // Handlers only ever see line totals that fit in i64 cents.
        line.checked_line_total()?;
        let quote = LineQuote::from(&*line);

        for rule in &line.rules {
            if !rule.enabled {
                trace!(code = %line.code, rule_type = %rule.rule_type, "Skipping disabled rule");
                continue;
            }

            let amount = self.evaluate(&rule.rule_type, &quote).ok_or_else(|| {
                CoreError::UnknownRuleType {
                    rule_type: rule.rule_type.clone(),
                    code: line.code.clone(),
                }
            })?;

            if amount > line.discount {
                debug!(
                    code = %line.code,
                    rule_type = %rule.rule_type,
                    discount = %amount,
                    "Discount improved"
                );
                line.discount = amount;
            }
        }

        Ok(())
    }

    /// Resolves every line, stopping at the first configuration error.
    pub fn resolve_all(&self, lines: &mut [LineItem]) -> CoreResult<()> {
        lines.iter_mut().try_for_each(|line| self.resolve(line))
    }
}

impl fmt::Debug for DiscountRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountRegistry")
            .field("rule_types", &self.rule_types())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, PricingRule};
    use proptest::prelude::*;

    fn dollars(d: i64) -> Money {
        Money::from_major_minor(d, 0)
    }

    fn line(code: &str, price: i64, qty: u32, rule_types: &[&str]) -> LineItem {
        let rules = rule_types
            .iter()
            .map(|t| PricingRule::new(*t, code, true))
            .collect();
        LineItem::new(CatalogItem::new(code, code, dollars(price)), qty, rules)
    }

    /// Test double returning a fixed amount regardless of the quote.
    struct Fixed(&'static str, Money);

    impl DiscountRule for Fixed {
        fn rule_type(&self) -> &str {
            self.0
        }

        fn discount(&self, _quote: &LineQuote) -> Money {
            self.1
        }
    }

    #[test]
    fn test_three_for_two() {
        let rule = ThreeForTwo;
        assert_eq!(rule.discount(&LineQuote::new(dollars(75), 1)), Money::zero());
        assert_eq!(rule.discount(&LineQuote::new(dollars(75), 2)), dollars(75));
        assert_eq!(rule.discount(&LineQuote::new(dollars(75), 3)), dollars(75));
        assert_eq!(rule.discount(&LineQuote::new(dollars(75), 4)), dollars(150));
    }

    #[test]
    fn test_bulk() {
        let rule = Bulk::default();
        assert_eq!(rule.discount(&LineQuote::new(dollars(60), 2)), Money::zero());
        assert_eq!(rule.discount(&LineQuote::new(dollars(60), 3)), dollars(36));
        assert_eq!(rule.discount(&LineQuote::new(dollars(60), 4)), dollars(48));
    }

    #[test]
    fn test_bulk_custom_threshold() {
        let rule = Bulk::new(10, Percentage::from_percent(50));
        assert_eq!(rule.discount(&LineQuote::new(dollars(4), 9)), Money::zero());
        assert_eq!(rule.discount(&LineQuote::new(dollars(4), 10)), dollars(20));
    }

    #[test]
    fn test_resolve_keeps_largest() {
        let registry = DiscountRegistry::with_defaults();

        let mut azuki = line("AZUKI", 30, 3, &[RULE_THREE_FOR_TWO, RULE_BULK]);
        registry.resolve(&mut azuki).unwrap();
        assert_eq!(azuki.discount, dollars(30));
        assert_eq!(azuki.net_total(), dollars(60));

        // Order does not matter for the outcome
        let mut azuki = line("AZUKI", 30, 3, &[RULE_BULK, RULE_THREE_FOR_TWO]);
        registry.resolve(&mut azuki).unwrap();
        assert_eq!(azuki.discount, dollars(30));
    }

    #[test]
    fn test_later_larger_discount_replaces_smaller() {
        // three-for-two yields $30 first, then a 90% bulk rule yields $81
        let registry = DiscountRegistry::new()
            .with_rule(ThreeForTwo)
            .unwrap()
            .with_rule(Bulk::new(3, Percentage::from_percent(90)))
            .unwrap();

        let mut l = line("AZUKI", 30, 3, &[RULE_THREE_FOR_TWO, RULE_BULK]);
        registry.resolve(&mut l).unwrap();
        assert_eq!(l.discount, dollars(81));
    }

    #[test]
    fn test_zero_does_not_override() {
        let registry = DiscountRegistry::with_defaults();

        // PUNK × 2: three-for-two gives $60, bulk gives $0
        let mut punk = line("PUNK", 60, 2, &[RULE_THREE_FOR_TWO, RULE_BULK]);
        registry.resolve(&mut punk).unwrap();
        assert_eq!(punk.discount, dollars(60));
    }

    #[test]
    fn test_no_rules_means_no_discount() {
        let registry = DiscountRegistry::with_defaults();
        let mut meebit = line("MEEBIT", 4, 5, &[]);
        registry.resolve(&mut meebit).unwrap();
        assert_eq!(meebit.discount, Money::zero());
    }

    #[test]
    fn test_unknown_rule_type_is_an_error() {
        let registry = DiscountRegistry::with_defaults();
        let mut ape = line("APE", 75, 2, &["buy-one-get-one"]);

        let err = registry.resolve(&mut ape).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownRuleType { ref rule_type, ref code }
                if rule_type == "buy-one-get-one" && code == "APE"
        ));
    }

    #[test]
    fn test_out_of_range_line_is_an_error() {
        let registry = DiscountRegistry::with_defaults();
        let mut gem = LineItem::new(
            CatalogItem::new("GEM", "Gem", Money::from_cents(4_000_000_000_000_000_000)),
            3,
            vec![PricingRule::new(RULE_BULK, "GEM", true)],
        );

        assert!(matches!(
            registry.resolve(&mut gem),
            Err(CoreError::LineOverflow { ref code }) if code == "GEM"
        ));
        assert_eq!(gem.discount, Money::zero());
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let registry = DiscountRegistry::with_defaults();
        let mut ape = line("APE", 75, 2, &[]);
        ape.rules.push(PricingRule::new(RULE_THREE_FOR_TWO, "APE", false));

        registry.resolve(&mut ape).unwrap();
        assert_eq!(ape.discount, Money::zero());
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = DiscountRegistry::with_defaults();
        let err = registry.register(Bulk::default()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateRuleType(ref t) if t == RULE_BULK));
    }

    #[test]
    fn test_registered_rule_is_dispatched() {
        let mut registry = DiscountRegistry::with_defaults();
        registry.register(Fixed("loyalty", dollars(5))).unwrap();

        assert!(registry.contains("loyalty"));
        assert_eq!(registry.rule_types(), vec![RULE_BULK, "loyalty", RULE_THREE_FOR_TWO]);

        let mut meebit = line("MEEBIT", 4, 3, &["loyalty"]);
        registry.resolve(&mut meebit).unwrap();
        assert_eq!(meebit.discount, dollars(5));
    }

    #[test]
    fn test_handler_output_is_clamped() {
        let registry = DiscountRegistry::new()
            .with_rule(Fixed("too-generous", dollars(1000)))
            .unwrap()
            .with_rule(Fixed("negative", Money::from_cents(-100)))
            .unwrap();

        let mut meebit = line("MEEBIT", 4, 2, &["negative", "too-generous"]);
        registry.resolve(&mut meebit).unwrap();
        assert_eq!(meebit.discount, dollars(8));
    }

    #[test]
    fn test_resolve_all_stops_on_error() {
        let registry = DiscountRegistry::with_defaults();
        let mut lines = vec![
            line("APE", 75, 2, &[RULE_THREE_FOR_TWO]),
            line("PUNK", 60, 3, &["mystery"]),
        ];

        assert!(registry.resolve_all(&mut lines).is_err());
        assert_eq!(lines[0].discount, dollars(75));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        /// Property: 0 ≤ discount ≤ price × qty for every resolved line.
        #[test]
        fn resolved_discount_is_bounded(
            price_cents in 0i64..1_000_000,
            qty in 0u32..1_000
        ) {
            let registry = DiscountRegistry::with_defaults();
            let item = CatalogItem::new("X", "X", Money::from_cents(price_cents));
            let rules = vec![
                PricingRule::new(RULE_THREE_FOR_TWO, "X", true),
                PricingRule::new(RULE_BULK, "X", true),
            ];
            let mut l = LineItem::new(item, qty, rules);

            registry.resolve(&mut l).unwrap();

            prop_assert!(l.discount >= Money::zero());
            prop_assert!(l.discount <= l.line_total());
        }

        /// Property: more units never lower a rule's discount.
        #[test]
        fn discount_is_monotonic_in_quantity(
            price_cents in 0i64..1_000_000,
            qty in 0u32..999
        ) {
            let price = Money::from_cents(price_cents);
            let rules: [&dyn DiscountRule; 2] = [&ThreeForTwo, &Bulk::default()];

            for rule in rules {
                let smaller = rule.discount(&LineQuote::new(price, qty));
                let larger = rule.discount(&LineQuote::new(price, qty + 1));
                prop_assert!(larger >= smaller, "{} decreased", rule.rule_type());
            }
        }
    }
}
