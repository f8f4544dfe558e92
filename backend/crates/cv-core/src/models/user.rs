//! Locally registered user.

use crate::Udid;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user registered against this service.
/// Users are append-only: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique key of the identity store
    pub email: String,
    /// Argon2 PHC string; never leaves the server
    pub password_hash: String,
    pub name: String,
    pub udid: Udid,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and UDID.
    /// The display name defaults to the local part of the email.
    pub fn new(email: String, password_hash: String) -> Self {
        let name = Self::default_name(&email);
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            udid: Udid::generate(),
            created_at: Utc::now(),
        }
    }

    fn default_name(email: &str) -> String {
        email.split('@').next().unwrap_or_default().to_string()
    }
}
