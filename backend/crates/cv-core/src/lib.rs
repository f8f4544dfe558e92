pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::udid::Udid;
pub use models::user::User;
pub use validation::{MIN_PASSWORD_LENGTH, validate_credentials, validate_unique_id};

#[cfg(test)]
mod tests;
