// src/main.rs
use axum::{extract::Extension, routing::get, Json, Router};
use chrono::Duration;
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod common;
mod services;

use common::{ApiResponse, AppConfig, AppState};
use services::{GoogleOauthClient, UserService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Fails fast on a missing signing secret or OAuth credentials; the
    // process must not serve traffic it cannot authenticate
    let config = AppConfig::from_env()?;

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let tokens = auth::token::TokenService::new(
        config.jwt_secret.clone(),
        Duration::hours(config.access_ttl_hours),
        Duration::days(config.refresh_ttl_days),
    )?;
    info!("TokenService initialized");

    let google = Arc::new(GoogleOauthClient::new(config.google.clone()));
    info!("GoogleOauthClient initialized");

    let users = Arc::new(UserService::new(pool.clone()));
    info!("UserService initialized");

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        db: pool,
        frontend_url: config.frontend_url.clone(),
        tokens,
        google,
        users,
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        .merge(auth::auth_routes())
        .route("/test", get(test_handler))
        .layer(Extension(shared.clone()))
        .layer({
            let origins: Vec<axum::http::HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /test - liveness check
async fn test_handler() -> Json<ApiResponse> {
    Json(ApiResponse::success("Hello World"))
}
