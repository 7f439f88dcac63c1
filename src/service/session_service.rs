//! Server-side sessions persisted in the relational store.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::config::crypto::CryptoService;
use crate::error::AppError;
use crate::models::session::Session;

pub struct SessionService {
    pool: PgPool,
    crypto: CryptoService,
    ttl_secs: i64,
}

impl SessionService {
    pub fn new(pool: PgPool, crypto: CryptoService, ttl_secs: i64) -> Self {
        Self {
            pool,
            crypto,
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a fresh session for `user_id`.
    pub async fn create(&self, user_id: i32) -> Result<Session, AppError> {
        let token = self.crypto.generate_session_token();
        let expires_at = Utc::now() + Duration::seconds(self.ttl_secs);

        let session = sqlx::query_as::<_, Session>(
            r#"
                INSERT INTO sessions (token, user_id, expires_at)
                VALUES ($1, $2, $3)
                RETURNING *
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Resolve a token to its session, ignoring expired rows.
    pub async fn get(&self, token: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE token = $1 AND expires_at >= $2",
        )
        .bind(token)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// Invalidate a session. Deleting an unknown token is a no-op.
    pub async fn delete(&self, token: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Drop expired session rows. Run periodically from main.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
