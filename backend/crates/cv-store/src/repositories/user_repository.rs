use crate::Result as StoreErrorResult;

use cv_core::User;

use async_trait::async_trait;
use uuid::Uuid;

/// Persistence seam for locally registered users.
///
/// Emails are matched exactly. `insert` is the only write and must reject a
/// second user with the same email even when two registrations race past
/// an `exists` check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreErrorResult<Option<User>>;

    async fn exists(&self, email: &str) -> StoreErrorResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Store a new user, failing with `StoreError::DuplicateEmail` if taken.
    async fn insert(&self, user: User) -> StoreErrorResult<User>;

    async fn find_by_id(&self, id: Uuid) -> StoreErrorResult<Option<User>>;

    async fn count(&self) -> StoreErrorResult<usize>;
}
