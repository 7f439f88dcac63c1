//! Application error taxonomy and HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// SMS provider or OTP persistence failure. The cause is logged
    /// server-side; clients only see a generic message.
    #[error("Failed to send verification code")]
    Delivery(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Delivery(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Internal(cause) => {
                tracing::error!(error = %cause, "Internal server error");
            }
            AppError::Delivery(cause) => {
                tracing::error!(error = %cause, "Failed to deliver verification code");
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(format!("Database error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn error_response(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[actix_web::test]
    async fn internal_hides_details() {
        let (status, body) = error_response(AppError::Internal(
            "Database error: connection refused at 10.0.0.5:5432".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body["error"].as_str().unwrap().contains("10.0.0.5"));
    }

    #[actix_web::test]
    async fn delivery_hides_provider_cause() {
        let (status, body) = error_response(AppError::Delivery(
            "Twilio returned 503 Service Unavailable".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Failed to send verification code");
        assert!(!body["error"].as_str().unwrap().contains("Twilio"));
    }

    #[actix_web::test]
    async fn validation_is_bad_request() {
        let (status, body) =
            error_response(AppError::Validation("phoneNumber is invalid".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "phoneNumber is invalid");
    }

    #[actix_web::test]
    async fn unauthenticated_and_forbidden_are_distinct() {
        let (status, _) =
            error_response(AppError::Unauthenticated("No active session".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            error_response(AppError::Forbidden("Admin access required".to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn not_found_and_conflict() {
        let (status, _) = error_response(AppError::NotFound("Post not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            error_response(AppError::Conflict("Username already exists".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
