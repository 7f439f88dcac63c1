use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use color_eyre::Result;
use eyre::WrapErr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cyberguard_backend::config::config::Config;
use cyberguard_backend::config::crypto::CryptoService;
use cyberguard_backend::config::routes::routes;
use cyberguard_backend::service::content_service::ContentService;
use cyberguard_backend::service::otp_service::OtpService;
use cyberguard_backend::service::session_service::SessionService;
use cyberguard_backend::service::sms_service::TwilioSms;
use cyberguard_backend::service::user_service::UserService;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().wrap_err("Failed to load config")?;
    let pool = config
        .db_pool()
        .await
        .wrap_err("Failed to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .wrap_err("Failed to run migrations")?;

    let crypto = CryptoService::new();
    let sms = TwilioSms::new(
        &config.twilio_account_sid,
        &config.twilio_auth_token,
        &config.twilio_phone_number,
    );

    let users = web::Data::new(UserService::new(pool.clone(), crypto.clone()));
    let sessions = web::Data::new(SessionService::new(
        pool.clone(),
        crypto.clone(),
        config.session_ttl_secs,
    ));
    let otp = web::Data::new(OtpService::new(
        pool.clone(),
        crypto,
        Box::new(sms),
        config.platform_name.clone(),
    ));
    let content = web::Data::new(ContentService::new(pool));

    // Expired session rows accumulate otherwise; sweep them hourly.
    {
        let sessions = sessions.clone();
        actix_web::rt::spawn(async move {
            let mut interval = actix_web::rt::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                interval.tick().await;
                match sessions.purge_expired().await {
                    Ok(purged) if purged > 0 => info!(purged, "Purged expired sessions"),
                    Ok(_) => {}
                    Err(err) => warn!(error = %err, "Session purge failed"),
                }
            }
        });
    }

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(users.clone())
            .app_data(sessions.clone())
            .app_data(otp.clone())
            .app_data(content.clone())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
