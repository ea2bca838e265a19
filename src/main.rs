use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use user_service::bootstrap::app_context::{AppContext, AppServices};
use user_service::bootstrap::config::Config;
use user_service::infrastructure::crypto::password::Argon2PasswordHasher;
use user_service::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            user_service::presentation::http::auth::signup,
            user_service::presentation::http::auth::login,
            user_service::presentation::http::users::list_users,
            user_service::presentation::http::users::get_user,
            user_service::presentation::http::health::health,
        ),
        components(schemas(
            user_service::presentation::http::auth::SignupRequest,
            user_service::presentation::http::auth::LoginRequest,
            user_service::presentation::http::auth::UserResponse,
            user_service::presentation::http::auth::AuthResponse,
            user_service::presentation::http::users::UserListResponse,
            user_service::presentation::http::users::UserEnvelope,
            user_service::presentation::http::error::ErrorBody,
            user_service::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Signup and login"),
            (name = "Users", description = "Account listing and lookup"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "user_service=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting user service");

    // Database
    let pool = user_service::infrastructure::db::connect_pool(
        &cfg.database_url,
        cfg.database_max_connections,
    )
    .await?;
    user_service::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let services = AppServices::new(user_repo, password_hasher);
    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [http::Method::GET, http::Method::POST, http::Method::OPTIONS];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE]),
        Some(Err(e)) => {
            warn!(error = %e, "FRONTEND_URL is not a valid origin; CORS disabled");
            CorsLayer::new()
        }
        // Development convenience
        None if !cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers([http::header::CONTENT_TYPE]),
        None => CorsLayer::new(),
    };

    let app = user_service::presentation::http::router(ctx)
        .merge(user_service::presentation::http::health::routes(pool.clone()))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
