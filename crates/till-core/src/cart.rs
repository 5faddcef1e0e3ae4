//! # Cart
//!
//! The quantities of items a customer intends to purchase, keyed by item code.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  scan("APE")    ──► APE absent?  insert 1   │ else +1                   │
//! │  remove("APE")  ──► APE > 0?     −1         │ else no-op                │
//! │  codes()        ──► every code, including quantity 0                    │
//! │                                                                         │
//! │  NOTE: a code dropped to 0 stays in the cart. It is still looked up    │
//! │        on total() and simply contributes nothing.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither mutation can fail: codes are opaque strings and quantities are
//! unsigned, so "never negative" holds by construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The shopping cart.
///
/// ## Invariants
/// - Quantity is never negative (`u32`, decrement guarded)
/// - A code may be present with quantity 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<String, u32>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `code`, creating the entry at 1 if absent.
    pub fn scan(&mut self, code: &str) {
        let qty = self.items.entry(code.to_string()).or_insert(0);
        *qty = qty.saturating_add(1);
    }

    /// Removes one unit of `code` if present with a positive quantity.
    ///
    /// Absent codes and codes already at 0 are left untouched.
    pub fn remove(&mut self, code: &str) {
        if let Some(qty) = self.items.get_mut(code) {
            *qty = qty.saturating_sub(1);
        }
    }

    /// Returns the quantity held for `code`, if the code was ever scanned.
    pub fn quantity(&self, code: &str) -> Option<u32> {
        self.items.get(code).copied()
    }

    /// Every code in the cart, including those at quantity 0.
    pub fn codes(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    /// Read-only view of the code → quantity mapping.
    pub fn snapshot(&self) -> &BTreeMap<String, u32> {
        &self.items
    }

    /// True when no code has ever been scanned (or after `clear`).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct codes.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all codes.
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for Cart {
    /// Builds a cart by scanning each code in turn.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for code in iter {
            cart.scan(code.as_ref());
        }
        cart
    }
}
