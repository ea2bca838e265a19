use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::ports::user_repository::UserRepositoryError;
use crate::application::use_cases::auth::login::LoginError;
use crate::application::use_cases::auth::register::RegisterError;

/// Message shared by every failed login, whatever the underlying cause.
pub const INVALID_LOGIN: &str = "invalid email or password";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Boundary error. Internal failures are logged here and reach the client
/// only as a generic message.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(&'static str),
    NotFound(&'static str),
    Conflict(String),
    Internal(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(m) | Self::Conflict(m) => m,
            Self::Unauthorized(m) | Self::NotFound(m) => m.to_string(),
            Self::Internal(e) => {
                error!(error = ?e, "request_failed");
                "Internal server error".to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<RegisterError> for ApiError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::Validation(m) => Self::BadRequest(m.to_string()),
            RegisterError::DuplicateAccount => Self::Conflict(e.to_string()),
            RegisterError::Hashing(_) | RegisterError::Storage(_) => Self::Internal(e.into()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::Validation(m) => Self::BadRequest(m.to_string()),
            LoginError::AccountNotFound | LoginError::InvalidCredentials => {
                Self::Unauthorized(INVALID_LOGIN)
            }
            LoginError::CorruptCredential(_) | LoginError::Storage(_) => Self::Internal(e.into()),
        }
    }
}

impl From<UserRepositoryError> for ApiError {
    fn from(e: UserRepositoryError) -> Self {
        Self::Internal(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::password_hasher::HashingError;

    #[test]
    fn login_failures_share_one_shape() {
        let a = ApiError::from(LoginError::AccountNotFound);
        let b = ApiError::from(LoginError::InvalidCredentials);
        assert_eq!(a.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(a.status(), b.status());
        assert!(matches!((a, b), (ApiError::Unauthorized(x), ApiError::Unauthorized(y)) if x == y));
    }

    #[test]
    fn register_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(RegisterError::Validation("All fields are required")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RegisterError::DuplicateAccount).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(RegisterError::Hashing(HashingError("rng".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_are_redacted() {
        let resp = ApiError::from(RegisterError::Storage(anyhow::anyhow!(
            "relation \"users\" does not exist"
        )))
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }
}
