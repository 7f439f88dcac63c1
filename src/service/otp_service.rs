//! Issuance and verification of phone one-time codes.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, error};

use crate::config::crypto::CryptoService;
use crate::error::AppError;
use crate::models::otp_code::OtpCode;
use crate::service::sms_service::SmsSender;

const OTP_TTL_MINUTES: i64 = 10;

pub struct OtpService {
    pool: PgPool,
    crypto: CryptoService,
    sms: Box<dyn SmsSender>,
    platform_name: String,
}

fn otp_message(platform_name: &str, code: &str) -> String {
    format!("Your {platform_name} verification code is: {code}. Valid for 10 minutes.")
}

impl OtpService {
    pub fn new(
        pool: PgPool,
        crypto: CryptoService,
        sms: Box<dyn SmsSender>,
        platform_name: String,
    ) -> Self {
        Self {
            pool,
            crypto,
            sms,
            platform_name,
        }
    }

    /// Generate a fresh code for `phone_number`, persist it and hand it to
    /// the SMS collaborator. Prior live codes for the same number are left
    /// untouched; several can coexist until they expire or get used.
    ///
    /// Any persistence or delivery failure is logged and surfaced as a
    /// generic delivery error; the caller may retry.
    pub async fn send_code(&self, phone_number: &str) -> Result<(), AppError> {
        let code = self.crypto.generate_otp_code();
        let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);

        let issued = sqlx::query_as::<_, OtpCode>(
            r#"
                INSERT INTO otp_codes (phone_number, code, expires_at)
                VALUES ($1, $2, $3)
                RETURNING *
            "#,
        )
        .bind(phone_number)
        .bind(&code)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to persist OTP code");
            AppError::Delivery(format!("Failed to persist OTP code: {e}"))
        })?;
        debug!(otp_id = issued.id, expires_at = %issued.expires_at, "Issued OTP code");

        self.sms
            .send(phone_number, &otp_message(&self.platform_name, &code))
            .await
    }

    /// Mark the oldest live code matching (phone, code) as used.
    ///
    /// Returns `Ok(true)` iff a row transitioned. The match and the
    /// `is_used` flip happen in one conditional UPDATE so two concurrent
    /// verifies can never both succeed on the same row.
    pub async fn verify_code(&self, phone_number: &str, code: &str) -> Result<bool, AppError> {
        let updated = sqlx::query(
            r#"
                UPDATE otp_codes
                SET is_used = TRUE
                WHERE is_used = FALSE
                  AND id = (
                    SELECT id FROM otp_codes
                    WHERE phone_number = $1
                      AND code = $2
                      AND is_used = FALSE
                      AND expires_at >= $3
                    ORDER BY id
                    LIMIT 1
                  )
                RETURNING id
            "#,
        )
        .bind(phone_number)
        .bind(code)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated.is_some())
    }
}
