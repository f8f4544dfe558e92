use crate::{Result as StoreErrorResult, StoreError, UserRepository};

use cv_core::User;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local user store keyed by email. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> StoreErrorResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn exists(&self, email: &str) -> StoreErrorResult<bool> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn insert(&self, user: User) -> StoreErrorResult<User> {
        // Check and insert under one write lock
        let mut users = self.users.write().await;

        match users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::duplicate_email(user.email)),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> StoreErrorResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn count(&self) -> StoreErrorResult<usize> {
        Ok(self.users.read().await.len())
    }
}
