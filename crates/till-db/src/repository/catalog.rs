//! # Catalog Repository
//!
//! Database operations for catalog items (the price source).
//!
//! ## Scoped Lookups
//! ```text
//! list([])               → every item
//! list(["APE", "PUNK"])  → only APE and PUNK rows
//! list(["NOPE"])         → []  (unknown codes are simply absent)
//! ```
//!
//! Prices are read on demand for the codes in a cart rather than cached, so
//! a total always reflects the current price.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::validation::validate_catalog_item;
use till_core::CatalogItem;

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists catalog items, restricted to `codes` when it is non-empty.
    pub async fn list(&self, codes: &[String]) -> DbResult<Vec<CatalogItem>> {
        debug!(codes = codes.len(), "Listing catalog items");

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT code, name, price FROM catalog_items");

        if !codes.is_empty() {
            query.push(" WHERE code IN (");
            let mut separated = query.separated(", ");
            for code in codes {
                separated.push_bind(code);
            }
            separated.push_unseparated(")");
        }

        query.push(" ORDER BY rowid");

        let items = query
            .build_query_as::<CatalogItem>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Catalog lookup returned items");
        Ok(items)
    }

    /// Gets a single item by code.
    pub async fn get(&self, code: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            "SELECT code, name, price FROM catalog_items WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts an item or replaces the name and price of an existing code.
    pub async fn upsert(&self, item: &CatalogItem) -> DbResult<()> {
        validate_catalog_item(item)?;

        debug!(code = %item.code, price = %item.price, "Upserting catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (code, name, price)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (code) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                updated_at = datetime('now')
            "#,
        )
        .bind(&item.code)
        .bind(&item.name)
        .bind(item.price.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes an item from the catalog.
    pub async fn delete(&self, code: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE code = ?1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CatalogItem", code));
        }

        Ok(())
    }

    /// Counts catalog items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
