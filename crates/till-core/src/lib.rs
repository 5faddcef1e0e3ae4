//! # till-core: Pure Pricing Logic for Till
//!
//! This crate is the **heart** of Till. It holds the cart, the money type
//! and the discount rules as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 till-checkout (CheckoutEngine)                  │   │
//! │  │     scan / remove ──► total ──► PriceProvider + RuleProvider   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ discount  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │ Registry  │  │   │
//! │  │   │ Pricing   │  │Percentage │  │           │  │ Bulk, 3x2 │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog items, pricing rules, line items, checkout summary
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The owned cart of item codes and quantities
//! - [`discount`] - Discount rule trait, built-in rules and the registry
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for catalog data
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::discount::{DiscountRegistry, LineQuote};
//! use till_core::money::Money;
//!
//! let registry = DiscountRegistry::with_defaults();
//! let quote = LineQuote::new(Money::from_major_minor(60, 0), 4);
//!
//! // Four units at $60.00 qualify for the 20% bulk discount
//! let discount = registry.evaluate("bulk", &quote).unwrap();
//! assert_eq!(discount, Money::from_major_minor(48, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use discount::{DiscountRegistry, DiscountRule, LineQuote};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percentage};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rule type tag for the pair discount (one free unit per two owned).
pub const RULE_THREE_FOR_TWO: &str = "three-for-two";

/// Rule type tag for the bulk discount.
pub const RULE_BULK: &str = "bulk";

/// Minimum quantity before the bulk discount applies.
pub const BULK_MIN_QUANTITY: u32 = 3;

/// Bulk discount rate in basis points (2000 = 20%).
pub const BULK_DISCOUNT_BPS: u32 = 2000;

/// Longest accepted item code.
pub const MAX_CODE_LENGTH: usize = 32;
