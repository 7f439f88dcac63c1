use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rand_core::OsRng;
use tracing::instrument;

use crate::error::AppError;

/// Length of opaque session tokens (alphanumeric characters).
const SESSION_TOKEN_LEN: usize = 48;

#[derive(Debug, Clone, Default)]
pub struct CryptoService;

impl CryptoService {
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Result<Argon2<'static>, AppError> {
        let params = Params::new(
            32_768, // 32 MB
            3,      // iterations
            1,      // parallelism
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create Argon2 params: {e}")))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    #[instrument(skip(self, password))]
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Self::argon2()?;

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?
            .to_string();

        Ok(hash)
    }

    #[instrument(skip(self, password, hash))]
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash format: {e}")))?;

        let argon2 = Self::argon2()?;

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Uniform 6-digit code in 100000..=999999. Codes with leading zeros
    /// are excluded on purpose; this matches what clients were issued
    /// historically and must be preserved for compatibility.
    pub fn generate_otp_code(&self) -> String {
        let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Opaque random token used as the session primary key.
    pub fn generate_session_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let crypto = CryptoService::new();
        let hash = crypto.hash_password("Passw0rd!").unwrap();
        assert_ne!(hash, "Passw0rd!");
        assert!(crypto.verify_password("Passw0rd!", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let crypto = CryptoService::new();
        let hash = crypto.hash_password("Passw0rd!").unwrap();
        assert!(!crypto.verify_password("passw0rd!", &hash).unwrap());
    }

    #[test]
    fn invalid_hash_is_an_error_not_a_mismatch() {
        let crypto = CryptoService::new();
        assert!(crypto.verify_password("anything", "not-a-hash").is_err());
    }

    #[test]
    fn otp_codes_are_six_digits_without_leading_zero() {
        let crypto = CryptoService::new();
        for _ in 0..200 {
            let code = crypto.generate_otp_code();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn session_tokens_are_long_and_alphanumeric() {
        let crypto = CryptoService::new();
        let token = crypto.generate_session_token();
        assert_eq!(token.len(), SESSION_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, crypto.generate_session_token());
    }
}
