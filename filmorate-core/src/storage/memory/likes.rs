use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, StoreError};

/// The shared like set: membership pairs of (film id, user id).
///
/// Shared between the film and user storages because deleting either entity
/// must cascade into it.
#[derive(Debug, Default)]
pub struct MemoryLikes {
    inner: Mutex<HashSet<(i32, i32)>>,
}

impl MemoryLikes {
    fn lock(&self) -> Result<MutexGuard<'_, HashSet<(i32, i32)>>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Internal("like set mutex poisoned".to_string()))
    }

    /// Idempotent: liking the same film twice is a single membership.
    pub fn add(&self, film_id: i32, user_id: i32) -> Result<()> {
        self.lock()?.insert((film_id, user_id));
        Ok(())
    }

    pub fn remove(&self, film_id: i32, user_id: i32) -> Result<()> {
        self.lock()?.remove(&(film_id, user_id));
        Ok(())
    }

    pub fn remove_all_for_film(&self, film_id: i32) -> Result<()> {
        self.lock()?.retain(|&(film, _)| film != film_id);
        Ok(())
    }

    pub fn remove_all_for_user(&self, user_id: i32) -> Result<()> {
        self.lock()?.retain(|&(_, user)| user != user_id);
        Ok(())
    }

    /// Like count per film id. Films without likes are simply absent here;
    /// ranking treats them as 0.
    pub fn counts_by_film(&self) -> Result<HashMap<i32, i64>> {
        let likes = self.lock()?;
        let mut counts = HashMap::new();
        for &(film_id, _) in likes.iter() {
            *counts.entry(film_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
