// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::services::{GoogleOauthClient, UserService};

/// Application state containing the database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub frontend_url: String,
    pub tokens: TokenService,
    pub google: Arc<GoogleOauthClient>,
    pub users: Arc<UserService>,
}
