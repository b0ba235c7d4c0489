//! Storage ports and their backends.
//!
//! One polymorphic entity-store port covers the unified create/update/get/
//! delete/list flow; film- and user-specific ports extend it with the
//! relationship operations (likes, friendships) and reference-data lookups.
//! Backends are selected at composition time: a mutex-guarded in-memory
//! variant and a Postgres variant with parameterized SQL.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use filmorate_model::{Film, Genre, Mpa, User};

use crate::error::Result;

/// An id-keyed record that a store can persist.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Resource name used in logs.
    const RESOURCE: &'static str;

    fn id(&self) -> Option<i32>;
    fn set_id(&mut self, id: i32);
}

impl Entity for Film {
    const RESOURCE: &'static str = "film";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

impl Entity for User {
    const RESOURCE: &'static str = "user";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

/// Id-keyed persistence port for one entity type.
///
/// Both backends must behave identically from the caller's perspective:
/// `create` assigns the id and returns the stored copy, `update` is a full
/// replace failing with `NotFound` for absent ids, `delete` is an idempotent
/// no-op when the id is absent, and `find_all` lists in insertion order for
/// the in-memory backend and table order for the relational one.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    async fn create(&self, entity: T) -> Result<T>;
    async fn update(&self, entity: T) -> Result<T>;
    async fn get_by_id(&self, id: i32) -> Result<Option<T>>;
    async fn delete(&self, id: i32) -> Result<()>;
    async fn find_all(&self) -> Result<Vec<T>>;
}

/// Film persistence plus likes and the genre/MPA reference tables.
///
/// Deleting a film cascades to every like referencing it.
#[async_trait]
pub trait FilmStorage: EntityStore<Film> {
    async fn add_like(&self, user_id: i32, film_id: i32) -> Result<()>;
    async fn remove_like(&self, user_id: i32, film_id: i32) -> Result<()>;

    /// Films ordered by descending like count, ties broken by ascending id.
    /// Films with zero likes are included with a count of 0.
    async fn films_by_likes(&self, offset: i64, limit: i64) -> Result<Vec<Film>>;

    async fn all_genres(&self) -> Result<Vec<Genre>>;
    async fn genre_by_id(&self, id: i32) -> Result<Option<Genre>>;
    async fn all_mpa(&self) -> Result<Vec<Mpa>>;
    async fn mpa_by_id(&self, id: i32) -> Result<Option<Mpa>>;
}

/// User persistence plus directed friendships.
///
/// A friendship `add(a, b)` creates the edge a→b only; the pair is mutual
/// when the reverse edge also exists. Deleting a user cascades to likes and
/// to friendship edges in both directions.
#[async_trait]
pub trait UserStorage: EntityStore<User> {
    async fn add_friendship(&self, user_id: i32, friend_id: i32) -> Result<()>;
    async fn remove_friendship(&self, user_id: i32, friend_id: i32) -> Result<()>;

    /// Users X for which the edge user→X exists, ascending id, each carrying
    /// the derived mutual flag.
    async fn friends_of(&self, user_id: i32) -> Result<Vec<User>>;

    /// Intersection of `friends_of(user_id)` and `friends_of(other_id)`,
    /// ascending id.
    async fn common_friends(&self, user_id: i32, other_id: i32) -> Result<Vec<User>>;
}
