//! # Validation Module
//!
//! Input validation for registration, search and cart quantities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  ├── Required fields, input types                                      │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront-client services                                   │
//! │  └── THIS MODULE: shape checks before anything is persisted            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SessionManager                                               │
//! │  └── Duplicate email check against fixture + registered users          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_email, validate_search_term};
//!
//! assert!(validate_email("a@x.com").is_ok());
//! assert!(validate_email("not-an-email").is_err());
//!
//! assert_eq!(validate_search_term("  phone ").unwrap(), "phone");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewUser;
use crate::{MAX_ITEM_QUANTITY, MAX_SEARCH_TERM_LEN, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_EMAIL_LEN: usize = 254;
const MAX_NAME_LEN: usize = 100;

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - No whitespace (emails are matched exactly, so padding would make the
///   account unreachable)
/// - Exactly one '@' with text on both sides
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            "email",
            "must not contain whitespace",
        ));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::invalid_format(
            "email",
            "must look like name@domain",
        )),
    }
}

/// Validates a password. Any non-empty value is accepted.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Validates a display name (1-100 characters after trimming).
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates registration input field by field, first failure wins.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    validate_email(&user.email)?;
    validate_password(&user.password)?;
    validate_user_name(&user.name)?;
    Ok(())
}

/// Validates a catalog search term.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - At most 100 characters after trimming
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.chars().count() > MAX_SEARCH_TERM_LEN {
        return Err(ValidationError::TooLong {
            field: "search term".to_string(),
            max: MAX_SEARCH_TERM_LEN,
        });
    }

    Ok(term.to_string())
}

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a cart line's unit price: `0..=MAX_UNIT_PRICE_CENTS` cents.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !(0..=MAX_UNIT_PRICE_CENTS).contains(&price.cents()) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@shop.example").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email(" a@x.com").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("p").is_ok());
        assert!(validate_password(" ").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("Ada Lovelace").is_ok());
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
        assert!(validate_user_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_user_reports_first_failure() {
        let user = NewUser::new("bad", "", "");
        let err = validate_new_user(&user).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "email"));

        let user = NewUser::new("a@x.com", "", "A");
        let err = validate_new_user(&user).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "password"));

        assert!(validate_new_user(&NewUser::new("a@x.com", "p", "A")).is_ok());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("").unwrap(), "");
        assert_eq!(validate_search_term("  lamp  ").unwrap(), "lamp");
        assert!(validate_search_term(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS)).is_ok());

        assert!(validate_unit_price(Money::from_cents(-1)).is_err());
        assert!(validate_unit_price(Money::from_cents(i64::MAX)).is_err());
    }
}
