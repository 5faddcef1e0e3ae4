//! # Pricing Rule Repository
//!
//! Keeping rules in a table lets pricing change without a redeploy.
//!
//! ## Filter Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list([])              → every rule, enabled or not (admin listing)     │
//! │  list(["APE","PUNK"])  → enabled rules for APE and PUNK only           │
//! │                                                                         │
//! │  Rows come back in insertion order; checkout evaluates them in that    │
//! │  order and keeps the first of equally good discounts.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::validation::validate_pricing_rule;
use till_core::PricingRule;

/// Repository for pricing rule database operations.
#[derive(Debug, Clone)]
pub struct RuleRepository {
    pool: SqlitePool,
}

impl RuleRepository {
    /// Creates a new RuleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RuleRepository { pool }
    }

    /// Lists rules following the filter contract above.
    pub async fn list(&self, codes: &[String]) -> DbResult<Vec<PricingRule>> {
        debug!(codes = codes.len(), "Listing pricing rules");

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT rule_type, code, enabled FROM pricing_rules");

        if !codes.is_empty() {
            query.push(" WHERE enabled = 1 AND code IN (");
            let mut separated = query.separated(", ");
            for code in codes {
                separated.push_bind(code);
            }
            separated.push_unseparated(")");
        }

        query.push(" ORDER BY id");

        let rules = query
            .build_query_as::<PricingRule>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rules.len(), "Rule lookup returned rules");
        Ok(rules)
    }

    /// Inserts a new rule.
    ///
    /// ## Errors
    /// - `DbError::Invalid` for a malformed tag or code
    /// - `DbError::UniqueViolation` if `(rule_type, code)` already exists
    pub async fn insert(&self, rule: &PricingRule) -> DbResult<()> {
        validate_pricing_rule(rule)?;

        debug!(rule_type = %rule.rule_type, code = %rule.code, "Inserting pricing rule");

        sqlx::query("INSERT INTO pricing_rules (rule_type, code, enabled) VALUES (?1, ?2, ?3)")
            .bind(&rule.rule_type)
            .bind(&rule.code)
            .bind(rule.enabled)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate(
                    "pricing rule",
                    format!("{}/{}", rule.rule_type, rule.code),
                ),
                other => other,
            })?;

        Ok(())
    }

    /// Toggles a rule on or off.
    pub async fn set_enabled(&self, rule_type: &str, code: &str, enabled: bool) -> DbResult<()> {
        debug!(rule_type = %rule_type, code = %code, enabled, "Toggling pricing rule");

        let result =
            sqlx::query("UPDATE pricing_rules SET enabled = ?3 WHERE rule_type = ?1 AND code = ?2")
                .bind(rule_type)
                .bind(code)
                .bind(enabled)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "PricingRule",
                format!("{}/{}", rule_type, code),
            ));
        }

        Ok(())
    }

    /// Counts all rules, enabled or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing_rules")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
