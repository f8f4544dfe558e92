pub mod error;
pub mod repositories;

pub use error::{Result, StoreError};
pub use repositories::in_memory_user_repository::InMemoryUserRepository;
pub use repositories::sqlite_user_repository::SqliteUserRepository;
pub use repositories::user_repository::UserRepository;

#[cfg(test)]
mod tests;
