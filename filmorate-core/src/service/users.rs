use std::sync::Arc;

use filmorate_model::{User, validate_user};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::service::ensure_store_assigned;
use crate::storage::UserStorage;

/// User CRUD plus friendship orchestration.
#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn UserStorage>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(storage: Arc<dyn UserStorage>) -> Self {
        Self { storage }
    }

    /// Validates and stores a new user. An empty display name defaults to
    /// the login.
    pub async fn create(&self, mut user: User) -> Result<User> {
        ensure_store_assigned(user.id)?;
        validate_user(&user)?;
        if user.name.is_empty() {
            user.name = user.login.clone();
        }
        debug!(login = %user.login, "creating user");
        self.storage.create(user).await
    }

    /// Full replace; the id must resolve to an existing user.
    pub async fn update(&self, user: User) -> Result<User> {
        validate_user(&user)?;
        let id = user.id.ok_or(StoreError::NotFound)?;
        self.get_by_id(id).await?;
        debug!(id, "updating user");
        self.storage.update(user).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User> {
        self.storage.get_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        debug!(id, "deleting user");
        self.storage.delete(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        self.storage.find_all().await
    }

    pub async fn friends(&self, id: i32) -> Result<Vec<User>> {
        self.ensure_exists(id).await?;
        self.storage.friends_of(id).await
    }

    pub async fn common_friends(&self, id: i32, other_id: i32) -> Result<Vec<User>> {
        self.ensure_exists(id).await?;
        self.ensure_exists(other_id).await?;
        self.storage.common_friends(id, other_id).await
    }

    pub async fn add_friendship(&self, id: i32, friend_id: i32) -> Result<()> {
        self.ensure_exists(id).await?;
        self.ensure_exists(friend_id).await?;
        debug!(id, friend_id, "adding friendship");
        self.storage.add_friendship(id, friend_id).await
    }

    pub async fn remove_friendship(&self, id: i32, friend_id: i32) -> Result<()> {
        self.ensure_exists(id).await?;
        self.ensure_exists(friend_id).await?;
        debug!(id, friend_id, "removing friendship");
        self.storage.remove_friendship(id, friend_id).await
    }

    pub(crate) async fn ensure_exists(&self, id: i32) -> Result<()> {
        self.get_by_id(id).await.map(|_| ())
    }
}
