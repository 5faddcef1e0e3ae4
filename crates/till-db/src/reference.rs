//! # Reference Data
//!
//! The launch catalog and rule set. Used by the `seed` binary and by the
//! in-memory providers that stand in for the real sources.
//!
//! ```text
//! Code     Name           Price    Rules
//! ──────   ────────────   ──────   ─────────────────────
//! APE      Bored Apes     $75.00   three-for-two
//! PUNK     Crypto Punks   $60.00   bulk
//! AZUKI    Azuki          $30.00   three-for-two, bulk
//! MEEBIT   Meebits         $4.00   -
//! ```

use till_core::{CatalogItem, Money, PricingRule, RULE_BULK, RULE_THREE_FOR_TWO};

/// The reference catalog, in listing order.
pub fn catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("APE", "Bored Apes", Money::from_major_minor(75, 0)),
        CatalogItem::new("PUNK", "Crypto Punks", Money::from_major_minor(60, 0)),
        CatalogItem::new("AZUKI", "Azuki", Money::from_major_minor(30, 0)),
        CatalogItem::new("MEEBIT", "Meebits", Money::from_major_minor(4, 0)),
    ]
}

/// The reference rule set, in evaluation order.
pub fn rules() -> Vec<PricingRule> {
    vec![
        PricingRule::new(RULE_THREE_FOR_TWO, "APE", true),
        PricingRule::new(RULE_THREE_FOR_TWO, "AZUKI", true),
        PricingRule::new(RULE_BULK, "PUNK", true),
        PricingRule::new(RULE_BULK, "AZUKI", true),
    ]
}
