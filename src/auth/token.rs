//! JWT issuing and verification
//!
//! Single shared HS256 secret for both credential kinds. The algorithm is
//! pinned: a token whose header names any other algorithm fails verification
//! outright. Leeway is zero so the embedded expiry is exact to the second.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::error;

use super::models::{Claims, TokenKind, User};
use crate::common::ApiError;

/// Outcome of verifying a token.
///
/// Callers branch on `Expired` specifically: an expired access credential
/// means a refresh attempt is worthwhile, anything else terminates the
/// session.
#[derive(Debug)]
pub enum TokenVerification {
    Valid(Claims),
    Expired,
    Invalid,
}

/// Issues and verifies the signed session credentials.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// An empty secret would let the process mint tokens nobody can trust,
    /// so it is rejected here and treated as fatal by the caller.
    pub fn new(
        secret: impl Into<String>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> anyhow::Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            anyhow::bail!("signing secret is not configured");
        }
        Ok(Self {
            secret,
            access_ttl,
            refresh_ttl,
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Sign a credential of `kind` for `user` expiring `ttl` from now.
    pub fn issue(&self, user: &User, kind: TokenKind, ttl: Duration) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            kind,
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            error!(error = %e, user_id = user.id, "JWT encoding error");
            ApiError::InternalServer("jwt error".to_string())
        })
    }

    pub fn issue_access(&self, user: &User) -> Result<String, ApiError> {
        self.issue(user, TokenKind::Access, self.access_ttl)
    }

    pub fn issue_refresh(&self, user: &User) -> Result<String, ApiError> {
        self.issue(user, TokenKind::Refresh, self.refresh_ttl)
    }

    /// Check signature, algorithm, and expiry. Signature and algorithm
    /// problems are indistinguishable to the caller on purpose.
    pub fn verify(&self, token: &str) -> TokenVerification {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => TokenVerification::Valid(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => TokenVerification::Expired,
                _ => TokenVerification::Invalid,
            },
        }
    }
}
