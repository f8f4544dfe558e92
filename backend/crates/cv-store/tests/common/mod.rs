use cv_store::SqliteUserRepository;

use cv_core::User;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite repository with migrations run
pub async fn create_test_repository() -> SqliteUserRepository {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    SqliteUserRepository::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    SqliteUserRepository::new(pool)
}

pub fn create_test_user(email: &str) -> User {
    User::new(email.to_string(), "$argon2id$v=19$stub".to_string())
}
