//! # Checkout Errors
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total()                                                                │
//! │    ├── rule / price source failed ──► ProviderUnavailable               │
//! │    │       (no retry, no partial total)                                 │
//! │    ├── rule type has no handler ───► Configuration                      │
//! │    └── price × qty past i64 cents ─► AmountOverflow                     │
//! │                                                                         │
//! │  scan() / remove() never fail.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::CoreError;
use till_db::DbError;

/// Failure reported by a price or rule source.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The source could not be reached or refused the request.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected or failed the query.
    #[error(transparent)]
    Storage(DbError),
}

impl From<DbError> for ProviderError {
    fn from(err: DbError) -> Self {
        if err.is_unavailable() {
            ProviderError::Unavailable(err.to_string())
        } else {
            ProviderError::Storage(err)
        }
    }
}

/// Errors returned by [`CheckoutEngine`](crate::engine::CheckoutEngine).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The discount setup is wrong (e.g. a rule type with no handler).
    #[error("Configuration error: {0}")]
    Configuration(#[source] CoreError),

    /// A line total or the checkout total does not fit in i64 cents.
    #[error("Amount out of range: {0}")]
    AmountOverflow(#[source] CoreError),

    /// A price or rule source failed; the whole total is abandoned.
    #[error("{provider} provider unavailable: {source}")]
    ProviderUnavailable {
        provider: &'static str,
        source: ProviderError,
    },
}

impl From<CoreError> for CheckoutError {
    fn from(err: CoreError) -> Self {
        if err.is_overflow() {
            CheckoutError::AmountOverflow(err)
        } else {
            CheckoutError::Configuration(err)
        }
    }
}

impl CheckoutError {
    pub(crate) fn prices(source: ProviderError) -> Self {
        CheckoutError::ProviderUnavailable {
            provider: "price",
            source,
        }
    }

    pub(crate) fn rules(source: ProviderError) -> Self {
        CheckoutError::ProviderUnavailable {
            provider: "rule",
            source,
        }
    }
}

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message() {
        let err = CheckoutError::prices(ProviderError::Unavailable("timeout".to_string()));
        assert_eq!(
            err.to_string(),
            "price provider unavailable: Source unavailable: timeout"
        );
    }

    #[test]
    fn test_core_error_becomes_configuration() {
        let err: CheckoutError = CoreError::UnknownRuleType {
            rule_type: "mystery".to_string(),
            code: "APE".to_string(),
        }
        .into();
        assert!(matches!(err, CheckoutError::Configuration(_)));
    }

    #[test]
    fn test_overflow_is_not_configuration() {
        let err: CheckoutError = CoreError::LineOverflow {
            code: "GEM".to_string(),
        }
        .into();
        assert!(matches!(err, CheckoutError::AmountOverflow(_)));
        assert_eq!(
            err.to_string(),
            "Amount out of range: Line total for item GEM is out of range"
        );
    }

    #[test]
    fn test_pool_failure_becomes_unavailable() {
        let err = CheckoutError::rules(DbError::PoolExhausted.into());
        assert_eq!(
            err.to_string(),
            "rule provider unavailable: Source unavailable: Connection pool exhausted"
        );
    }

    #[test]
    fn test_query_failure_is_wrapped() {
        let source: ProviderError = DbError::QueryFailed("no such table".to_string()).into();
        assert!(matches!(source, ProviderError::Storage(DbError::QueryFailed(_))));
    }
}
