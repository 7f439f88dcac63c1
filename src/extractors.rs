//! Request extractors for session authentication and admin gating.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::error::AppError;
use crate::models::user::User;
use crate::service::session_service::SessionService;
use crate::service::user_service::UserService;

/// Name of the session cookie held by the client.
pub const SESSION_COOKIE: &str = "sid";

/// Authenticated user, resolved from the `sid` cookie.
///
/// Rejects with 401 when the cookie is missing, unknown or expired.
pub struct AuthUser(pub User);

/// Authenticated admin. 401 without a valid session, 403 when the
/// session's user lacks the admin flag; the two are never conflated.
pub struct AdminUser(pub User);

fn data<T: 'static>(req: &HttpRequest) -> Result<web::Data<T>, AppError> {
    req.app_data::<web::Data<T>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("Missing application state".to_string()))
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = req
                .cookie(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| AppError::Unauthenticated("No active session".to_string()))?;

            let sessions = data::<SessionService>(&req)?;
            let users = data::<UserService>(&req)?;

            let session = sessions.get(&token).await?.ok_or_else(|| {
                AppError::Unauthenticated("Invalid or expired session".to_string())
            })?;

            let user = users.get_user(session.user_id).await?.ok_or_else(|| {
                AppError::Unauthenticated("Invalid or expired session".to_string())
            })?;

            Ok(AuthUser(user))
        })
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let AuthUser(user) = AuthUser::extract(&req).await?;

            if !user.is_admin {
                return Err(AppError::Forbidden("Admin access required".to_string()));
            }

            Ok(AdminUser(user))
        })
    }
}
