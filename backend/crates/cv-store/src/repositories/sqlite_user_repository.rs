use crate::{Result as StoreErrorResult, StoreError, UserRepository};

use cv_core::{Udid, User};

use std::panic::Location;
use std::path::Path;

use async_trait::async_trait;
use chrono::DateTime;
use error_location::ErrorLocation;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, migrate::Migrator};
use uuid::Uuid;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const MAX_CONNECTIONS: u32 = 5;

const FIND_BY_EMAIL: &str =
    "SELECT id, email, password_hash, name, udid, created_at FROM users WHERE email = ?";
const FIND_BY_ID: &str =
    "SELECT id, email, password_hash, name, udid, created_at FROM users WHERE id = ?";

/// User store backed by a SQLite database file.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `path` and apply migrations.
    pub async fn connect(path: &Path) -> StoreErrorResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Initialization {
                    message: format!("Failed to create database directory: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;
        info!("User database ready at {}", path.display());

        Ok(Self::new(pool))
    }

    pub async fn migrate(pool: &SqlitePool) -> StoreErrorResult<()> {
        MIGRATOR.run(pool).await?;
        Ok(())
    }

    /// Raw pool access for tests and maintenance tooling; request paths go
    /// through `UserRepository`.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn user_from_row(row: &SqliteRow) -> StoreErrorResult<User> {
        let id: String = row.try_get("id")?;
        let udid: String = row.try_get("udid")?;
        let created_at: i64 = row.try_get("created_at")?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| StoreError::corrupt_row("id", e.to_string()))?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            name: row.try_get("name")?,
            udid: udid
                .parse::<Udid>()
                .map_err(|e| StoreError::corrupt_row("udid", e.to_string()))?,
            created_at: DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
                StoreError::corrupt_row("created_at", format!("out of range: {}", created_at))
            })?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> StoreErrorResult<Option<User>> {
        let row = sqlx::query(FIND_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::user_from_row).transpose()
    }

    async fn exists(&self, email: &str) -> StoreErrorResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    async fn insert(&self, user: User) -> StoreErrorResult<User> {
        let result = sqlx::query(
            r#"
              INSERT INTO users (id, email, password_hash, name, udid, created_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.udid.as_str())
        .bind(user.created_at.timestamp_millis())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::duplicate_email(user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> StoreErrorResult<Option<User>> {
        let row = sqlx::query(FIND_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::user_from_row).transpose()
    }

    async fn count(&self) -> StoreErrorResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
