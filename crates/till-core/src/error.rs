//! # Error Types
//!
//! ```text
//! ValidationError ──► CoreError::Validation
//!                        │
//! DiscountRegistry ──────┤ UnknownRuleType, DuplicateRuleType
//!                        ▼
//!        till-checkout: CheckoutError::Configuration
//!
//! LineItem / CheckoutSummary ──► LineOverflow, TotalOverflow
//!                                   ▼
//!        till-checkout: CheckoutError::AmountOverflow
//! ```
//!
//! Nothing in this crate does I/O, so nothing here is transient.

use thiserror::Error;

/// Discount setup errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item carries a rule whose type has no registered handler.
    ///
    /// ## When This Occurs
    /// - The rule table gained a new `type` before the handler was shipped
    /// - A typo in the rule table (`bulck` instead of `bulk`)
    ///
    /// This is a configuration problem, never a silent skip.
    #[error("No discount handler registered for rule type '{rule_type}' (item {code})")]
    UnknownRuleType { rule_type: String, code: String },

    /// A handler was registered twice under the same tag.
    #[error("Discount handler for rule type '{0}' is already registered")]
    DuplicateRuleType(String),

    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// Unit price × quantity for one line does not fit in i64 cents.
    #[error("Line total for item {code} is out of range")]
    LineOverflow { code: String },

    /// The sum of the line totals does not fit in i64 cents.
    #[error("Checkout total is out of range")]
    TotalOverflow,
}

impl CoreError {
    /// True for amounts too large to represent, as opposed to a setup mistake.
    pub fn is_overflow(&self) -> bool {
        matches!(self, CoreError::LineOverflow { .. } | CoreError::TotalOverflow)
    }
}

/// A catalog item or pricing rule that must not be stored.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rule_type_message() {
        let err = CoreError::UnknownRuleType {
            rule_type: "buy-one-get-one".to_string(),
            code: "APE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No discount handler registered for rule type 'buy-one-get-one' (item APE)"
        );
    }

    #[test]
    fn test_overflow_errors() {
        let err = CoreError::LineOverflow {
            code: "GEM".to_string(),
        };
        assert_eq!(err.to_string(), "Line total for item GEM is out of range");
        assert!(err.is_overflow());
        assert!(CoreError::TotalOverflow.is_overflow());
        assert!(!CoreError::DuplicateRuleType("bulk".to_string()).is_overflow());
    }

    #[test]
    fn test_invalid_rule_tag_message() {
        let err: CoreError = ValidationError::InvalidFormat {
            field: "type".to_string(),
            reason: "must be lowercase words joined by hyphens".to_string(),
        }
        .into();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Invalid record: type has invalid format: must be lowercase words joined by hyphens"
        );
    }

    #[test]
    fn test_code_too_long_message() {
        let err = ValidationError::TooLong {
            field: "code".to_string(),
            max: 32,
        };
        assert_eq!(err.to_string(), "code must be at most 32 characters");
    }
}
