//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::cookies::ACCESS_COOKIE;
use super::models::TokenKind;
use super::token::TokenVerification;
use crate::common::{ApiError, AppState};

/// Authenticated user extractor
///
/// Reads the access cookie, verifies it, and re-resolves the user from the
/// store (the user may have been deleted since the token was issued). An
/// expired credential is rejected distinctly so the frontend knows a refresh
/// attempt is worthwhile; this guard never refreshes on its own.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InternalServer("cookie parsing failed".to_string()))?;

        let token = match jar.get(ACCESS_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => {
                warn!("Authentication failed: JWT cookie not found");
                return Err(ApiError::Unauthorized(
                    "Invalid session: JWT token not found".to_string(),
                ));
            }
        };

        let claims = match app_state.tokens.verify(&token) {
            // A refresh token in the access slot verifies cryptographically
            // but must never authorize a protected request
            TokenVerification::Valid(claims) if claims.kind != TokenKind::Access => {
                warn!("Authentication failed: non-access token in access cookie");
                return Err(ApiError::Unauthorized("JWT invalid".to_string()));
            }
            TokenVerification::Valid(claims) => claims,
            TokenVerification::Expired => {
                warn!("Authentication failed: JWT expired");
                return Err(ApiError::Unauthorized("JWT expired".to_string()));
            }
            TokenVerification::Invalid => {
                warn!("Authentication failed: JWT invalid");
                return Err(ApiError::Unauthorized("JWT invalid".to_string()));
            }
        };

        let user = app_state
            .users
            .find_by_email(&claims.email)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error during user lookup in authentication");
                ApiError::DatabaseError(e)
            })?;

        match user {
            Some(u) => {
                debug!(user_id = u.id, "User authentication successful via extractor");
                Ok(AuthedUser {
                    id: u.id,
                    email: u.email,
                    name: u.name,
                })
            }
            None => {
                warn!(user_id = claims.sub, "Authentication failed: user not found");
                Err(ApiError::Unauthorized("User not found".to_string()))
            }
        }
    }
}
