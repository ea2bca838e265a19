use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::UserResponse;
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub status: &'static str,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub status: &'static str,
    pub user: UserResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/users", tag = "Users", responses(
    (status = 200, body = UserListResponse),
    (status = 500, body = ErrorBody)
))]
pub async fn list_users(State(ctx): State<AppContext>) -> Result<Json<UserListResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute().await?;
    Ok(Json(UserListResponse {
        status: "success",
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[utoipa::path(get, path = "/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, body = UserEnvelope),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest("invalid user id".into()))?;
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(UserEnvelope {
        status: "success",
        user: user.into(),
    }))
}
