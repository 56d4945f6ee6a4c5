// src/common/migrations.rs
//! Database schema management

use sqlx::SqlitePool;
use tracing::info;

/// Create all tables that don't exist yet
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_user_tables(pool).await?;
    info!("Database migration completed");
    Ok(())
}

async fn create_user_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // UNIQUE(email) is load-bearing: concurrent first logins race to insert
    // and the loser must find the winner's row instead of creating a second one
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            avatar TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
