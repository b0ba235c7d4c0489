//! In-memory backend.
//!
//! Entity maps and relationship sets are guarded by mutexes so the backend
//! is safe under concurrent request handling. Likes are shared between the
//! film and user storages because deleting either entity cascades into the
//! same set.

mod films;
mod likes;
mod store;
mod users;

pub use films::MemoryFilmStorage;
pub use likes::MemoryLikes;
pub use store::MemoryStore;
pub use users::MemoryUserStorage;

use std::sync::Arc;

/// Builds the complete in-memory backend with a shared like set and seeded
/// reference data.
pub fn memory_backend() -> (Arc<MemoryFilmStorage>, Arc<MemoryUserStorage>) {
    let likes = Arc::new(MemoryLikes::default());
    let films = Arc::new(MemoryFilmStorage::new(Arc::clone(&likes)));
    let users = Arc::new(MemoryUserStorage::new(likes));
    (films, users)
}
