//! # Validation Module
//!
//! Input validation for catalog items and pricing rules before they are
//! written to a rule or price store.
//!
//! The cart itself never validates: `scan` and `remove` accept any string
//! as an opaque code. Validation guards the data sources instead, so a bad
//! code can never be given a price or a rule in the first place.
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_item_code, validate_rule_type};
//!
//! assert!(validate_item_code("APE").is_ok());
//! assert!(validate_rule_type("three-for-two").is_ok());
//! assert!(validate_rule_type("Three For Two").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{CatalogItem, PricingRule};
use crate::MAX_CODE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item code.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_CODE_LENGTH` characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_item_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name (1-200 characters).
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a rule type tag: lowercase kebab-case, e.g. `three-for-two`.
pub fn validate_rule_type(rule_type: &str) -> ValidationResult<()> {
    if rule_type.is_empty() {
        return Err(ValidationError::Required {
            field: "type".to_string(),
        });
    }

    let kebab = rule_type
        .split('-')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    if !kebab {
        return Err(ValidationError::InvalidFormat {
            field: "type".to_string(),
            reason: "must be lowercase words joined by hyphens".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates every field of a catalog item.
pub fn validate_catalog_item(item: &CatalogItem) -> ValidationResult<()> {
    validate_item_code(&item.code)?;
    validate_item_name(&item.name)?;
    validate_price_cents(item.price.cents())
}

/// Validates every field of a pricing rule.
pub fn validate_pricing_rule(rule: &PricingRule) -> ValidationResult<()> {
    validate_rule_type(&rule.rule_type)?;
    validate_item_code(&rule.code)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_item_code() {
        assert!(validate_item_code("APE").is_ok());
        assert!(validate_item_code("MEEBIT_2").is_ok());
        assert!(validate_item_code("crypto-punk").is_ok());

        assert!(validate_item_code("").is_err());
        assert!(validate_item_code("   ").is_err());
        assert!(validate_item_code("BORED APE").is_err());
        assert!(validate_item_code(&"A".repeat(MAX_CODE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Bored Apes").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_rule_type() {
        assert!(validate_rule_type("bulk").is_ok());
        assert!(validate_rule_type("three-for-two").is_ok());
        assert!(validate_rule_type("buy-2-get-1").is_ok());

        assert!(validate_rule_type("").is_err());
        assert!(validate_rule_type("Bulk").is_err());
        assert!(validate_rule_type("three--two").is_err());
        assert!(validate_rule_type("-bulk").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(7500).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_entities() {
        let item = CatalogItem::new("APE", "Bored Apes", Money::from_cents(7500));
        assert!(validate_catalog_item(&item).is_ok());

        let free = CatalogItem::new("GIFT", "Gift", Money::zero());
        assert!(validate_catalog_item(&free).is_ok());

        let negative = CatalogItem::new("APE", "Bored Apes", Money::from_cents(-1));
        assert!(validate_catalog_item(&negative).is_err());

        assert!(validate_pricing_rule(&PricingRule::new("bulk", "PUNK", true)).is_ok());
        assert!(validate_pricing_rule(&PricingRule::new("bulk", "", true)).is_err());
    }
}
