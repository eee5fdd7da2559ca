//! Reader entity representing a registered library account.

use rust_decimal::Decimal;
use serde::Serialize;
use validator::Validate;

/// A registered reader.
///
/// Email is the identity key and is unique across the store. `balance` holds
/// signed currency with two-place precision and is mutated only by balance
/// reconciliation (penalties are negative, payments positive).
#[derive(Debug, Clone, Serialize)]
pub struct Reader {
    pub id: i64,
    pub email: String,
    pub email_is_verified: bool,
    pub balance: Decimal,
    /// Argon2 PHC-format hash. Never serialized out of the store layer.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Reader {
    pub fn new(
        id: i64,
        email: String,
        email_is_verified: bool,
        balance: Decimal,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            email,
            email_is_verified,
            balance,
            password_hash,
        }
    }
}

/// Registration input. The password is still plaintext here; hashing happens
/// in the reader service before anything touches the store.
#[derive(Debug, Clone, Validate)]
pub struct NewReader {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 50))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_creation() {
        let reader = Reader::new(
            7,
            "reader@example.com".to_string(),
            false,
            dec!(0.00),
            "$argon2id$stub".to_string(),
        );

        assert_eq!(reader.id, 7);
        assert_eq!(reader.email, "reader@example.com");
        assert!(!reader.email_is_verified);
        assert_eq!(reader.balance, Decimal::ZERO);
    }

    #[test]
    fn test_new_reader_valid() {
        let input = NewReader {
            email: "reader@example.com".to_string(),
            password: "long enough".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_new_reader_rejects_short_password() {
        let input = NewReader {
            email: "reader@example.com".to_string(),
            password: "abcd".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_reader_rejects_bad_email() {
        let input = NewReader {
            email: "not-an-email".to_string(),
            password: "long enough".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
