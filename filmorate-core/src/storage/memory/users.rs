use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use filmorate_model::User;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::storage::memory::{MemoryLikes, MemoryStore};
use crate::storage::{EntityStore, UserStorage};

/// In-memory user storage with the directed friendship set.
///
/// Friendship edges are ordered pairs (requester, target); the mutual flag
/// on friend-list projections is derived from the reverse edge, never
/// stored.
#[derive(Debug)]
pub struct MemoryUserStorage {
    users: MemoryStore<User>,
    friendships: Mutex<HashSet<(i32, i32)>>,
    likes: Arc<MemoryLikes>,
}

impl MemoryUserStorage {
    pub fn new(likes: Arc<MemoryLikes>) -> Self {
        Self {
            users: MemoryStore::new(),
            friendships: Mutex::new(HashSet::new()),
            likes,
        }
    }

    fn edges(&self) -> Result<MutexGuard<'_, HashSet<(i32, i32)>>> {
        self.friendships
            .lock()
            .map_err(|_| StoreError::Internal("friendship set mutex poisoned".to_string()))
    }

    /// Ids X with an edge user→X, ascending.
    fn friend_ids(&self, user_id: i32) -> Result<Vec<i32>> {
        let edges = self.edges()?;
        let mut ids: Vec<i32> = edges
            .iter()
            .filter(|&&(left, _)| left == user_id)
            .map(|&(_, right)| right)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn project_friends(&self, viewer_id: i32, ids: &[i32]) -> Result<Vec<User>> {
        let mut friends = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(mut user) = self.users.get(id)? {
                let mutual = self.edges()?.contains(&(id, viewer_id));
                user.is_friend = Some(mutual);
                friends.push(user);
            }
        }
        Ok(friends)
    }
}

#[async_trait]
impl EntityStore<User> for MemoryUserStorage {
    async fn create(&self, user: User) -> Result<User> {
        self.users.insert_new(user)
    }

    async fn update(&self, user: User) -> Result<User> {
        self.users.replace(user)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        self.users.get(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.users.remove(id)?;
        self.edges()?
            .retain(|&(left, right)| left != id && right != id);
        self.likes.remove_all_for_user(id)?;
        debug!(user_id = id, "deleted user, friendships and likes");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        self.users.all()
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn add_friendship(&self, user_id: i32, friend_id: i32) -> Result<()> {
        self.edges()?.insert((user_id, friend_id));
        Ok(())
    }

    async fn remove_friendship(&self, user_id: i32, friend_id: i32) -> Result<()> {
        self.edges()?.remove(&(user_id, friend_id));
        Ok(())
    }

    async fn friends_of(&self, user_id: i32) -> Result<Vec<User>> {
        let ids = self.friend_ids(user_id)?;
        self.project_friends(user_id, &ids)
    }

    async fn common_friends(&self, user_id: i32, other_id: i32) -> Result<Vec<User>> {
        let mine: Vec<i32> = self.friend_ids(user_id)?;
        let theirs: HashSet<i32> = self.friend_ids(other_id)?.into_iter().collect();
        let common: Vec<i32> = mine.into_iter().filter(|id| theirs.contains(id)).collect();
        self.project_friends(user_id, &common)
    }
}
