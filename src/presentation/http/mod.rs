use axum::{Router, routing::get};

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod error;
pub mod health;
pub mod users;

/// Account routes, without the database health probe or docs.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(health::banner))
        .merge(auth::routes(ctx.clone()))
        .merge(users::routes(ctx))
}
