//! # Database Error Types
//!
//! ```text
//! sqlx::Error / MigrateError ──► DbError ──► ProviderError (till-checkout)
//!                                              │
//!                    is_unavailable() ─────────┴─► Unavailable | Storage
//! ```

use thiserror::Error;
use till_core::ValidationError;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row for the given key.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// A unique constraint rejected the write, e.g. a second rule for the
    /// same `(rule_type, code)`.
    #[error("Duplicate {what}: '{value}' already exists")]
    UniqueViolation { what: String, value: String },

    /// Record failed validation before reaching SQLite.
    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    /// The file could not be opened or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Every connection stayed busy past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn duplicate(what: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            what: what.into(),
            value: value.into(),
        }
    }

    /// True when the store itself is unreachable, as opposed to a request
    /// it refused.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionFailed(_) | DbError::PoolExhausted | DbError::Internal(_)
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                match msg.strip_prefix("UNIQUE constraint failed: ") {
                    // e.g. "pricing_rules.rule_type, pricing_rules.code"
                    Some(columns) => DbError::duplicate(columns, "unknown"),
                    None => DbError::QueryFailed(msg.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DbError::not_found("CatalogItem", "APE").to_string(),
            "CatalogItem not found: APE"
        );
        assert_eq!(
            DbError::duplicate("pricing rule", "bulk/PUNK").to_string(),
            "Duplicate pricing rule: 'bulk/PUNK' already exists"
        );
    }

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!DbError::from(sqlx::Error::RowNotFound).is_unavailable());
    }

    #[test]
    fn test_validation_is_not_unavailable() {
        let err: DbError = ValidationError::Required {
            field: "code".to_string(),
        }
        .into();
        assert!(!err.is_unavailable());
    }
}
