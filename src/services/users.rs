// src/services/users.rs
//! User store adapter and identity resolution
//!
//! The auth core treats the user store as an external collaborator:
//! lookup-by-email, create-on-first-sight, read-by-id. Records are never
//! updated or deleted here; profile edits belong to a separate flow.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::auth::models::{IdentityAssertion, User};

#[derive(Debug, Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    /// Map an identity assertion to a local user record, creating one on
    /// first sight. Existing records are returned as-is: re-login never
    /// overwrites a user's name or avatar.
    ///
    /// Concurrent first logins with the same email race between the lookup
    /// and the insert; the UNIQUE(email) constraint makes the losing insert
    /// a no-op and the re-read below picks up the winner's row.
    pub async fn resolve(&self, assertion: &IdentityAssertion) -> Result<User, sqlx::Error> {
        if let Some(user) = self.find_by_email(&assertion.email).await? {
            debug!(user_id = user.id, "Found existing user for assertion");
            return Ok(user);
        }

        sqlx::query(
            "INSERT INTO users (email, name, avatar) VALUES (?, ?, ?) \
             ON CONFLICT(email) DO NOTHING",
        )
        .bind(&assertion.email)
        .bind(&assertion.name)
        .bind(assertion.avatar.as_deref())
        .execute(&self.db)
        .await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(&assertion.email)
            .fetch_one(&self.db)
            .await?;

        info!(user_id = user.id, "Created user on first login");
        Ok(user)
    }
}
