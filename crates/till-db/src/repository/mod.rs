//! # Repository Module
//!
//! Database repository implementations for Till.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout provider                                                      │
//! │       │                                                                 │
//! │       │  db.catalog().list(&codes)                                      │
//! │       ▼                                                                 │
//! │  CatalogRepository / RuleRepository                                    │
//! │  ├── list(&self, codes)                                                │
//! │  ├── upsert / insert                                                   │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Item prices by code
//! - [`rule::RuleRepository`] - Pricing rules by code

pub mod catalog;
pub mod rule;
