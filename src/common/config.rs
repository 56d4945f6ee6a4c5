//! Application configuration loaded once at startup
//!
//! A missing signing secret or OAuth client credential is a fatal
//! misconfiguration: the process must refuse to serve traffic rather than
//! issue tokens it cannot sign or verify.

use anyhow::{bail, Context};
use std::env;

use crate::services::google::GoogleOauthConfig;

const MAX_ACCESS_TTL_HOURS: i64 = 24 * 365;
const MAX_REFRESH_TTL_DAYS: i64 = 365;

/// Immutable configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub access_ttl_hours: i64,
    pub refresh_ttl_days: i64,
    pub google: GoogleOauthConfig,
    pub frontend_url: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://clip.db".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(s) if !s.trim().is_empty() => s,
            _ => bail!("JWT_SECRET must be set to a non-empty signing secret"),
        };

        let access_ttl_hours = env::var("ACCESS_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24);
        let refresh_ttl_days = env::var("REFRESH_TOKEN_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(7);
        // Bounded so the duration construction at startup cannot overflow;
        // a decade-long session credential is a configuration mistake anyway
        if !(1..=MAX_ACCESS_TTL_HOURS).contains(&access_ttl_hours) {
            bail!(
                "ACCESS_TOKEN_TTL_HOURS must be between 1 and {}",
                MAX_ACCESS_TTL_HOURS
            );
        }
        if !(1..=MAX_REFRESH_TTL_DAYS).contains(&refresh_ttl_days) {
            bail!(
                "REFRESH_TOKEN_TTL_DAYS must be between 1 and {}",
                MAX_REFRESH_TTL_DAYS
            );
        }

        let client_id = env::var("GOOGLE_CLIENT_ID").context("GOOGLE_CLIENT_ID must be set")?;
        let client_secret =
            env::var("GOOGLE_CLIENT_SECRET").context("GOOGLE_CLIENT_SECRET must be set")?;
        let redirect_uri = env::var("GOOGLE_OAUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/google/callback".to_string());

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            access_ttl_hours,
            refresh_ttl_days,
            google: GoogleOauthConfig {
                client_id,
                client_secret,
                redirect_uri,
            },
            frontend_url,
            cors_origins,
        })
    }
}
