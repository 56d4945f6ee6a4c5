//! Authentication routes

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /auth/login` - Redirect to Google's authorization page
/// - `GET /auth/google/callback` - OAuth callback, establishes the session
/// - `GET /auth/refresh` - Rotate the access credential
/// - `DELETE /auth/logout` - Clear both session cookies
/// - `GET /auth/user/profile` - Current user (guarded)
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/login", get(handlers::login))
        .route("/auth/google/callback", get(handlers::google_callback))
        .route("/auth/refresh", get(handlers::refresh))
        .route("/auth/logout", delete(handlers::logout))
        .route("/auth/user/profile", get(handlers::profile))
}
