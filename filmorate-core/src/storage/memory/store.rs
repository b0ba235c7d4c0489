use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, StoreError};
use crate::storage::Entity;

/// Generic mutex-guarded entity map with a monotonically increasing id
/// counter.
///
/// Ids start at 1 and are never reused, so iterating the map in key order is
/// the same as insertion order.
#[derive(Debug)]
pub struct MemoryStore<T> {
    inner: Mutex<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    entities: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entities: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<T>>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Internal(format!("{} store mutex poisoned", T::RESOURCE)))
    }

    /// Assigns the next id and stores the entity, returning the stored copy.
    pub fn insert_new(&self, mut entity: T) -> Result<T> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        entity.set_id(id);
        inner.entities.insert(id, entity.clone());
        Ok(entity)
    }

    /// Full replace; fails with `NotFound` when the id is absent.
    pub fn replace(&self, entity: T) -> Result<T> {
        let id = entity.id().ok_or(StoreError::NotFound)?;
        let mut inner = self.lock()?;
        if !inner.entities.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        inner.entities.insert(id, entity.clone());
        Ok(entity)
    }

    pub fn get(&self, id: i32) -> Result<Option<T>> {
        Ok(self.lock()?.entities.get(&id).cloned())
    }

    /// Idempotent; removing an absent id is a no-op.
    pub fn remove(&self, id: i32) -> Result<()> {
        self.lock()?.entities.remove(&id);
        Ok(())
    }

    pub fn all(&self) -> Result<Vec<T>> {
        Ok(self.lock()?.entities.values().cloned().collect())
    }
}
