//! # Validation Module
//!
//! Boundary validation: raw form fields in, strict typed records out.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum Form/Json extractors)                     │
//! │  ├── Type shape only (fields exist, are strings)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Trimming, emptiness, numeric/decimal parsing                      │
//! │  ├── password == confirm_password                                      │
//! │  └── Rejects with ValidationError; raw strings never travel inward     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraints (username, email)                              │
//! │                                                                         │
//! │  Defense in depth: each layer catches a different class of error       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewItem, Registration};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
pub fn validate_username(username: &str) -> ValidationResult<String> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    Ok(username.to_string())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain a single `@` with text on both sides. Deliberately
///   shallow; the address is a login identifier here, not a delivery
///   target.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next();

    match domain {
        Some(domain) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        }),
    }
}

/// Validates a password at registration time.
///
/// ## Rules
/// - At least 6 characters
/// - Login never validates length; whatever was registered must keep
///   working
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < 6 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
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

    Ok(name.to_string())
}

/// Parses a quantity form field.
///
/// ## Rules
/// - Must parse as an integer
/// - Must be >= 0 (zero stock is a valid catalog state)
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let quantity: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        })?;

    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(quantity)
}

/// Parses a price form field into cents.
///
/// ## Rules
/// - Must parse as an unsigned decimal with at most two fractional digits
/// - Zero is allowed (free items)
pub fn parse_price(input: &str) -> ValidationResult<i64> {
    let money = Money::parse_str(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "must be a decimal amount like 499 or 10.50".to_string(),
    })?;

    Ok(money.cents())
}

// =============================================================================
// Form Parsers
// =============================================================================

/// Parses an add/update item form into a typed [`NewItem`].
///
/// Trims name and category; an empty category becomes `None` to match the
/// nullable column.
pub fn parse_item_form(
    name: &str,
    category: &str,
    quantity: &str,
    price: &str,
) -> ValidationResult<NewItem> {
    let name = validate_item_name(name)?;

    let category = category.trim();
    let category = if category.is_empty() {
        None
    } else {
        Some(category.to_string())
    };

    Ok(NewItem {
        name,
        category,
        quantity: parse_quantity(quantity)?,
        price_cents: parse_price(price)?,
    })
}

/// Parses a registration form into a typed [`Registration`].
///
/// The password mismatch check runs before anything else touches storage,
/// so a mismatched confirmation can never create a user row.
pub fn parse_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<Registration> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    validate_password(password)?;

    Ok(Registration {
        username: validate_username(username)?,
        email: validate_email(email)?,
        password: password.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  alice  ").unwrap(), "alice");
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"a".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user1@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("15").unwrap(), 15);
        assert_eq!(parse_quantity(" 0 ").unwrap(), 0);
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("ten").is_err());
        assert!(parse_quantity("1.5").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1200").unwrap(), 120000);
        assert_eq!(parse_price("10.50").unwrap(), 1050);
        assert_eq!(parse_price("0").unwrap(), 0);
        assert!(parse_price("free").is_err());
        assert!(parse_price("-5").is_err());
    }

    #[test]
    fn test_parse_item_form() {
        let item = parse_item_form("  Bag  ", " Accessories ", "15", "1200").unwrap();
        assert_eq!(item.name, "Bag");
        assert_eq!(item.category.as_deref(), Some("Accessories"));
        assert_eq!(item.quantity, 15);
        assert_eq!(item.price_cents, 120000);

        // Empty category maps to the nullable column
        let item = parse_item_form("Pen", "", "200", "10").unwrap();
        assert_eq!(item.category, None);

        assert!(parse_item_form("", "x", "1", "1").is_err());
        assert!(parse_item_form("Pen", "", "many", "10").is_err());
        assert!(parse_item_form("Pen", "", "1", "cheap").is_err());
    }

    #[test]
    fn test_registration_password_mismatch_rejected_first() {
        // Even with an invalid username, the mismatch is what surfaces:
        // nothing else runs, nothing could have been stored
        let err = parse_registration("", "bad", "secret1", "secret2").unwrap_err();
        assert!(matches!(err, ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_registration_happy_path() {
        let reg =
            parse_registration(" alice ", "alice@example.com", "hunter22", "hunter22").unwrap();
        assert_eq!(reg.username, "alice");
        assert_eq!(reg.email, "alice@example.com");
        assert_eq!(reg.password, "hunter22");
    }

    #[test]
    fn test_registration_short_password() {
        assert!(parse_registration("bob", "bob@example.com", "abc", "abc").is_err());
    }
}
