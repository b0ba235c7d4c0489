use std::sync::Arc;

use filmorate_model::{Film, Genre, Mpa, validate_film};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::service::{UserService, ensure_store_assigned};
use crate::storage::FilmStorage;

/// Film CRUD plus likes, ranking and the genre/MPA reference lookups.
#[derive(Clone)]
pub struct FilmService {
    storage: Arc<dyn FilmStorage>,
    users: Arc<UserService>,
}

impl std::fmt::Debug for FilmService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilmService").finish_non_exhaustive()
    }
}

impl FilmService {
    pub fn new(storage: Arc<dyn FilmStorage>, users: Arc<UserService>) -> Self {
        Self { storage, users }
    }

    pub async fn create(&self, film: Film) -> Result<Film> {
        ensure_store_assigned(film.id)?;
        validate_film(&film)?;
        self.ensure_references_exist(&film).await?;
        debug!(name = %film.name, "creating film");
        self.storage.create(film).await
    }

    /// Full replace; the id must resolve to an existing film.
    pub async fn update(&self, film: Film) -> Result<Film> {
        validate_film(&film)?;
        let id = film.id.ok_or(StoreError::NotFound)?;
        self.get_by_id(id).await?;
        self.ensure_references_exist(&film).await?;
        debug!(id, "updating film");
        self.storage.update(film).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Film> {
        self.storage.get_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        debug!(id, "deleting film");
        self.storage.delete(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Film>> {
        self.storage.find_all().await
    }

    pub async fn add_like(&self, user_id: i32, film_id: i32) -> Result<()> {
        self.users.ensure_exists(user_id).await?;
        self.ensure_exists(film_id).await?;
        debug!(user_id, film_id, "adding like");
        self.storage.add_like(user_id, film_id).await
    }

    pub async fn remove_like(&self, user_id: i32, film_id: i32) -> Result<()> {
        self.users.ensure_exists(user_id).await?;
        self.ensure_exists(film_id).await?;
        debug!(user_id, film_id, "removing like");
        self.storage.remove_like(user_id, film_id).await
    }

    /// The `count` most-liked films; zero-like films rank below any film
    /// with at least one like.
    pub async fn popular(&self, count: i64) -> Result<Vec<Film>> {
        self.storage.films_by_likes(0, count.max(0)).await
    }

    pub async fn all_genres(&self) -> Result<Vec<Genre>> {
        self.storage.all_genres().await
    }

    pub async fn genre_by_id(&self, id: i32) -> Result<Genre> {
        self.storage.genre_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    pub async fn all_mpa(&self) -> Result<Vec<Mpa>> {
        self.storage.all_mpa().await
    }

    pub async fn mpa_by_id(&self, id: i32) -> Result<Mpa> {
        self.storage.mpa_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    async fn ensure_exists(&self, id: i32) -> Result<()> {
        self.get_by_id(id).await.map(|_| ())
    }

    /// Referential integrity for the MPA and genre references is enforced
    /// here so both backends reject unknown reference ids the same way.
    async fn ensure_references_exist(&self, film: &Film) -> Result<()> {
        if let Some(mpa) = &film.mpa {
            if self.storage.mpa_by_id(mpa.id).await?.is_none() {
                return Err(StoreError::NotFound);
            }
        }
        for genre in &film.genres {
            if self.storage.genre_by_id(genre.id).await?.is_none() {
                return Err(StoreError::NotFound);
            }
        }
        Ok(())
    }
}
