use std::time::Duration;

use color_eyre::Result;
use dotenv::dotenv;
use eyre::WrapErr;
use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_platform_name() -> String {
    "CyberGuard".to_string()
}

// 7 days, matching the original deployment's session cookie lifetime.
fn default_session_ttl_secs() -> i64 {
    604_800
}

/// Process configuration, read from the environment at startup.
///
/// Twilio credentials are plain fields here and injected into the SMS
/// client constructor, so tests can substitute a fake sender instead.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    #[serde(default = "default_platform_name")]
    pub platform_name: String,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        info!("Initializing configuration");
        let settings = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .wrap_err("Building configuration")?;

        settings
            .try_deserialize()
            .wrap_err("Loading configuration from environment")
    }

    pub async fn db_pool(&self) -> Result<PgPool> {
        info!("Initializing database pool");
        PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&self.database_url)
            .await
            .wrap_err("Creating database pool")
    }
}
