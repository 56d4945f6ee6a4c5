//! Authentication handlers

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::cookies::{
    access_cookie, clear_access, clear_refresh, refresh_cookie, REFRESH_COOKIE,
};
use super::extractors::AuthedUser;
use super::models::TokenKind;
use super::token::TokenVerification;
use crate::common::{ApiError, ApiResponse, AppState};

/// GET /auth/login
/// Redirects the browser to Google's authorization page. The URL is static,
/// built once at startup from configuration.
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Redirect {
    let state = state_lock.read().await.clone();
    info!("Starting Google OAuth flow");
    Redirect::to(state.google.authorization_url())
}

/// GET /auth/google/callback?code=...
/// Exchanges the authorization code, resolves the user, and establishes the
/// session: both cookies set, then a redirect to the frontend.
///
/// The code is caller-supplied input, so provider rejections surface as 401,
/// never as a server error.
pub async fn google_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<HashMap<String, String>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let state = state_lock.read().await.clone();

    if let Some(error) = params.get("error") {
        warn!(oauth_error = %error, "Google OAuth returned an error");
        return Err(ApiError::Unauthorized(
            "Google authentication failed".to_string(),
        ));
    }

    let code = params.get("code").ok_or_else(|| {
        warn!("OAuth callback without an authorization code");
        ApiError::Unauthorized("Google authentication failed".to_string())
    })?;

    let tokens = state.google.exchange_code(code).await.map_err(|e| {
        error!(error = %e, "Failed to exchange authorization code");
        ApiError::Unauthorized("Google authentication failed".to_string())
    })?;

    let assertion = state.google.fetch_profile(&tokens).await.map_err(|e| {
        error!(error = %e, "Failed to fetch Google profile");
        ApiError::Unauthorized("Google authentication failed".to_string())
    })?;

    let user = state
        .users
        .resolve(&assertion)
        .await
        .map_err(ApiError::DatabaseError)?;

    let access = state.tokens.issue_access(&user)?;
    let refresh = state.tokens.issue_refresh(&user)?;

    info!(user_id = user.id, "User authenticated via Google OAuth");

    let jar = jar
        .add(access_cookie(access, state.tokens.access_ttl()))
        .add(refresh_cookie(refresh, state.tokens.refresh_ttl()));

    Ok((jar, Redirect::to(&state.frontend_url)))
}

/// GET /auth/refresh
/// Rotates the access credential from the refresh credential. The refresh
/// cookie is both checked for presence and verified; it is never reissued
/// here. A missing refresh cookie means the session is unrecoverable, so
/// both cookies are cleared alongside the 401. A failing verification
/// leaves the cookies as-is.
pub async fn refresh(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    let token = match jar.get(REFRESH_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            warn!("Refresh failed: refresh cookie not found, clearing session");
            let jar = jar.add(clear_access()).add(clear_refresh());
            let body = ApiResponse::error("Invalid session: refresh token not found");
            return Ok((jar, (StatusCode::UNAUTHORIZED, Json(body))).into_response());
        }
    };

    let claims = match state.tokens.verify(&token) {
        // Only a refresh-kind token may mint a new access credential; an
        // access token in this slot is rejected like any other invalid token
        TokenVerification::Valid(claims) if claims.kind != TokenKind::Refresh => {
            warn!("Refresh failed: non-refresh token in refresh cookie");
            return Err(ApiError::Unauthorized("Refresh token invalid".to_string()));
        }
        TokenVerification::Valid(claims) => claims,
        TokenVerification::Expired => {
            warn!("Refresh failed: refresh token expired");
            return Err(ApiError::Unauthorized("Refresh token expired".to_string()));
        }
        TokenVerification::Invalid => {
            warn!("Refresh failed: refresh token invalid");
            return Err(ApiError::Unauthorized("Refresh token invalid".to_string()));
        }
    };

    let user = state
        .users
        .find_by_email(&claims.email)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| {
            warn!(user_id = claims.sub, "Refresh failed: user not found");
            ApiError::Unauthorized("User not found".to_string())
        })?;

    let access = state.tokens.issue_access(&user)?;
    let jar = jar.add(access_cookie(access, state.tokens.access_ttl()));

    info!(user_id = user.id, "Access token refreshed");

    let body = ApiResponse::success_with(
        "Token refreshed",
        serde_json::json!({
            "id": user.id,
            "email": user.email,
            "name": user.name,
        }),
    );
    Ok((jar, Json(body)).into_response())
}

/// DELETE /auth/logout
/// Clears both session cookies. Always succeeds.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse>) {
    info!("User logout");
    let jar = jar.add(clear_access()).add(clear_refresh());
    (jar, Json(ApiResponse::success("Logout successful")))
}

/// GET /auth/user/profile
/// Returns the current authenticated user.
pub async fn profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<ApiResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = state
        .users
        .find_by_id(authed.id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Json(ApiResponse::success_with(
        "User profile",
        serde_json::to_value(&user)
            .map_err(|e| ApiError::InternalServer(e.to_string()))?,
    )))
}
