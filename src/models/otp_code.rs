use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A single issued verification code. Rows are append-only; the only
/// mutation is the one-way `is_used` transition on a successful verify.
#[derive(Debug, Clone, FromRow)]
pub struct OtpCode {
    pub id: i32,
    pub phone_number: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
}
