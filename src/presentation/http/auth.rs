use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::account::AccountProfile;
use crate::presentation::http::error::{ApiError, ErrorBody};

// Field names follow the PascalCase wire format existing clients send.
// Missing fields default to empty and are rejected by the use cases.

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "PascalCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Accepted for compatibility; new accounts always get the `user` role.
    pub role: String,
}

/// Any `Role` sent by a client is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<AccountProfile> for UserResponse {
    fn from(p: AccountProfile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            role: p.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .with_state(ctx)
}

pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(v)| v).map_err(|rejection| {
        debug!(error = %rejection, "request_body_rejected");
        ApiError::BadRequest("Invalid request body".into())
    })
}

#[utoipa::path(post, path = "/signup", tag = "Auth", request_body = SignupRequest, responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody),
    (status = 500, body = ErrorBody)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let req = parse_body(payload)?;
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
    };
    let dto = RegisterDto {
        name: req.name,
        email: req.email,
        password: req.password,
        requested_role: req.role,
    };
    let user = uc.execute(&dto).await?;
    info!(user_id = user.id, "account_created");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/login", tag = "Auth", request_body = LoginRequest, responses(
    (status = 200, body = AuthResponse),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody),
    (status = 500, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let req = parse_body(payload)?;
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let uc = LoginUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?;
    Ok(Json(AuthResponse {
        message: "Login successful",
        user: user.into(),
    }))
}
