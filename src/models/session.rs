use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Server-side session: an opaque client-held token mapped to a user id.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}
