// src/services/google.rs
//! Google OAuth exchange client
//!
//! Drives the authorization-code -> token -> userinfo sequence. The
//! authorization URL is deterministic and built once at construction from
//! static configuration.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::models::IdentityAssertion;

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("OAuth exchange failed: {0}")]
    ExchangeFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("provider profile is missing email or name")]
    IncompleteProfile,

    #[error("failed to parse provider response: {0}")]
    SerializationError(String),
}

#[derive(Debug, Clone)]
pub struct GoogleOauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub token_type: String,
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleOauthClient {
    config: GoogleOauthConfig,
    client: Client,
    authorization_url: String,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl GoogleOauthClient {
    pub fn new(config: GoogleOauthConfig) -> Self {
        Self::with_endpoints(
            config,
            TOKEN_ENDPOINT.to_string(),
            USERINFO_ENDPOINT.to_string(),
        )
    }

    /// Same client pointed at explicit provider endpoints, used to exercise
    /// the exchange sequence against a local stand-in server.
    pub fn with_endpoints(
        config: GoogleOauthConfig,
        token_endpoint: String,
        userinfo_endpoint: String,
    ) -> Self {
        // A stalled provider call must not hold the request open indefinitely;
        // the timeout surfaces as RequestFailed and the caller sees a 401
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        let authorization_url = build_authorization_url(&config);

        Self {
            config,
            client,
            authorization_url,
            token_endpoint,
            userinfo_endpoint,
        }
    }

    /// The static authorization URL the login endpoint redirects to.
    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    /// Exchange an authorization code for tokens. One round trip.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, GoogleError> {
        let params = [
            ("code", code),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
            ("redirect_uri", &self.config.redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");

        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(GoogleError::ExchangeFailed(format!("HTTP {}", status)));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))
    }

    /// Fetch the user's profile and normalize it into an identity assertion.
    /// Email and name are both required downstream, so a profile missing
    /// either is a hard failure.
    pub async fn fetch_profile(
        &self,
        tokens: &TokenResponse,
    ) -> Result<IdentityAssertion, GoogleError> {
        let response = self
            .client
            .get(&self.userinfo_endpoint)
            .bearer_auth(&tokens.access_token)
            .send()
            .await
            .map_err(|e| GoogleError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Userinfo request failed");
            return Err(GoogleError::ExchangeFailed(format!("HTTP {}", status)));
        }

        let info = response
            .json::<UserInfo>()
            .await
            .map_err(|e| GoogleError::SerializationError(e.to_string()))?;

        normalize_profile(info)
    }
}

fn normalize_profile(info: UserInfo) -> Result<IdentityAssertion, GoogleError> {
    match (info.email, info.name) {
        (Some(email), Some(name)) => Ok(IdentityAssertion {
            email,
            name,
            avatar: info.picture,
        }),
        _ => Err(GoogleError::IncompleteProfile),
    }
}

fn build_authorization_url(config: &GoogleOauthConfig) -> String {
    let scopes = ["openid", "email", "profile"].join(" ");

    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&include_granted_scopes=true",
        AUTHORIZATION_ENDPOINT,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&scopes)
    )
}
