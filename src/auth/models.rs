//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Discriminates the two credential kinds inside the signed claims.
///
/// Both credentials share one secret and one claim shape, so without this
/// tag a refresh token pasted into the access cookie would verify and
/// authorize protected requests for its full lifetime. The guard accepts
/// only `Access`, the refresh endpoint only `Refresh`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
///
/// One claim shape is used for both the access and the refresh credential;
/// refresh verification only consumes `email` for the user re-lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    pub sub: i64,
    pub kind: TokenKind,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Normalized profile data obtained from Google after the code exchange.
/// Email and display name are hard requirements; a profile missing either
/// never reaches identity resolution.
#[derive(Debug, Clone)]
pub struct IdentityAssertion {
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
}
