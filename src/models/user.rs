use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// E.164: `+` followed by up to 15 digits, no leading zero.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,

    #[serde(skip_serializing)] // the hash never leaves the server
    pub password: String,

    pub is_admin: bool,
    pub phone_number: Option<String>,
    pub is_phone_verified: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub phone_number: String,
}

/// Validate an E.164 phone number string.
pub fn validate_phone_number(phone: &str) -> Result<(), AppError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Please enter a valid phone number in E.164 format (e.g. +1234567890)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_e164_numbers() {
        for phone in ["+15551234567", "+4915112345678", "+12", "+123456789012345"] {
            assert!(validate_phone_number(phone).is_ok(), "{phone}");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for phone in [
            "15551234567",       // missing +
            "+0155512345",       // leading zero
            "+1555123456789012", // 16 digits
            "+1555-123-4567",    // separators
            "+",
            "",
        ] {
            assert!(validate_phone_number(phone).is_err(), "{phone}");
        }
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password: "$argon2id$v=19$secret".to_string(),
            is_admin: false,
            phone_number: Some("+15551234567".to_string()),
            is_phone_verified: false,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["phoneNumber"], "+15551234567");
    }
}
