//! Registration, login/logout and the phone verification flow.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use crate::error::AppError;
use crate::extractors::{AuthUser, SESSION_COOKIE};
use crate::models::user::{validate_phone_number, NewUser};
use crate::service::otp_service::OtpService;
use crate::service::session_service::SessionService;
use crate::service::user_service::UserService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPhoneRequest {
    pub phone_number: String,
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    pub phone_number: String,
}

fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::seconds(max_age_secs))
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// POST /api/register — create the user, open a session and kick off
/// phone verification. A failed OTP send does not fail registration;
/// the client can hit /api/resend-otp.
pub async fn register(
    users: web::Data<UserService>,
    sessions: web::Data<SessionService>,
    otp: web::Data<OtpService>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    let new_user = body.into_inner();
    new_user.validate()?;
    validate_phone_number(&new_user.phone_number)?;

    let user = users.register(new_user).await?;
    let session = sessions.create(user.id).await?;

    if let Some(phone) = user.phone_number.as_deref() {
        if let Err(err) = otp.send_code(phone).await {
            warn!(user_id = user.id, error = %err, "OTP send failed during registration");
        }
    }

    Ok(HttpResponse::Created()
        .cookie(session_cookie(session.token, sessions.ttl_secs()))
        .json(user))
}

/// POST /api/login
pub async fn login(
    users: web::Data<UserService>,
    sessions: web::Data<SessionService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = users.login(&body.username, &body.password).await?;
    let session = sessions.create(user.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(session.token, sessions.ttl_secs()))
        .json(user))
}

/// POST /api/logout — idempotent; returns 200 even without a session.
pub async fn logout(
    sessions: web::Data<SessionService>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.delete(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(serde_json::json!({ "message": "Logged out" })))
}

/// GET /api/user — the session's user, or 401.
pub async fn current_user(user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(user.0)
}

/// POST /api/verify-phone
pub async fn verify_phone(
    users: web::Data<UserService>,
    otp: web::Data<OtpService>,
    body: web::Json<VerifyPhoneRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    request.validate()?;

    if !otp.verify_code(&request.phone_number, &request.code).await? {
        return Err(AppError::Validation(
            "Invalid or expired verification code".to_string(),
        ));
    }

    users.mark_phone_verified(&request.phone_number).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Phone number verified"
    })))
}

/// POST /api/resend-otp
pub async fn resend_otp(
    otp: web::Data<OtpService>,
    body: web::Json<ResendOtpRequest>,
) -> Result<HttpResponse, AppError> {
    validate_phone_number(&body.phone_number)?;
    otp.send_code(&body.phone_number).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Verification code sent"
    })))
}
