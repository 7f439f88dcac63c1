//! Credential store: registration, login and phone-verification state.

use sqlx::{Error as SqlxError, PgPool};

use crate::config::crypto::CryptoService;
use crate::error::AppError;
use crate::models::user::{NewUser, User};

pub struct UserService {
    pool: PgPool,
    crypto: CryptoService,
}

impl UserService {
    pub fn new(pool: PgPool, crypto: CryptoService) -> Self {
        Self { pool, crypto }
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a new user with a hashed password. The phone-verified flag
    /// starts false and only a successful OTP verify flips it.
    pub async fn register(&self, new_user: NewUser) -> Result<User, AppError> {
        let hashed_password = self.crypto.hash_password(&new_user.password)?;

        let result = sqlx::query_as::<_, User>(
            r#"
                INSERT INTO users (username, password, phone_number)
                VALUES ($1, $2, $3)
                RETURNING *
            "#,
        )
        .bind(&new_user.username)
        .bind(&hashed_password)
        .bind(&new_user.phone_number)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(err) => {
                if let SqlxError::Database(db_err) = &err {
                    if db_err.constraint() == Some("users_username_key") {
                        return Err(AppError::Conflict("Username already exists".to_string()));
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Authenticate username/password. Unknown user and wrong password
    /// produce the same error so callers cannot enumerate accounts.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let invalid =
            || AppError::Unauthenticated("Invalid username or password".to_string());

        let user = self
            .get_user_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !self.crypto.verify_password(password, &user.password)? {
            return Err(invalid());
        }

        Ok(user)
    }

    /// Flip the phone-verified flag for every user holding this number.
    pub async fn mark_phone_verified(&self, phone_number: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET is_phone_verified = TRUE WHERE phone_number = $1")
            .bind(phone_number)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
