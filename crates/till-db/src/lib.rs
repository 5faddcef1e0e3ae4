//! # till-db: Database Layer for Till
//!
//! SQLite storage for the two external data sources checkout consults:
//! the catalog (code → name, price) and the pricing rule table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Data Flow                                 │
//! │                                                                         │
//! │  CheckoutEngine::total()                                               │
//! │       │  (via SqliteCatalog / SqliteRules providers)                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     till-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ CatalogRepo   │    │ 001_catalog  │  │   │
//! │  │   │  SqlitePool   │    │ RuleRepo      │    │ 002_rules    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use till_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("till.db")).await?;
//! let items = db.catalog().list(&["APE".to_string()]).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod reference;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::rule::RuleRepository;
