//! # till-checkout: Checkout Engine for Till
//!
//! Prices a cart against external price and rule sources.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Crate Graph                               │
//! │                                                                         │
//! │   till (binary) ──► till-checkout (THIS CRATE)                         │
//! │                        │                                                │
//! │                        ├── CheckoutEngine   scan / remove / total       │
//! │                        ├── provider         PriceProvider, RuleProvider│
//! │                        └── config           TOML + environment          │
//! │                        │                                                │
//! │              ┌─────────┴──────────┐                                     │
//! │              ▼                    ▼                                     │
//! │         till-core            till-db                                    │
//! │   Cart, Money, registry   SQLite catalog + rules                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use till_checkout::{CheckoutEngine, InMemoryCatalog, InMemoryRules};
//!
//! let mut engine = CheckoutEngine::new(
//!     Arc::new(InMemoryCatalog::reference()),
//!     Arc::new(InMemoryRules::reference()),
//! );
//! engine.scan("APE");
//! engine.scan("APE");
//! engine.scan("PUNK");
//! assert_eq!(engine.total().await?.to_string(), "$135.00");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod provider;

pub use config::{ConfigError, SourceKind, TillConfig};
pub use engine::CheckoutEngine;
pub use error::{CheckoutError, CheckoutResult, ProviderError};
pub use provider::{
    InMemoryCatalog, InMemoryRules, PriceProvider, RuleProvider, RulesByCode, SqliteCatalog,
    SqliteRules,
};
