use std::sync::Arc;

use async_trait::async_trait;
use filmorate_model::{Film, Genre, Mpa};
use tracing::debug;

use crate::error::Result;
use crate::storage::memory::{MemoryLikes, MemoryStore};
use crate::storage::{EntityStore, FilmStorage};

/// In-memory film storage with the shared like set and seeded genre/MPA
/// reference tables.
#[derive(Debug)]
pub struct MemoryFilmStorage {
    films: MemoryStore<Film>,
    likes: Arc<MemoryLikes>,
    genres: Vec<Genre>,
    mpa: Vec<Mpa>,
}

fn seed_genres() -> Vec<Genre> {
    [
        "Комедия",
        "Драма",
        "Мультфильм",
        "Триллер",
        "Документальный",
        "Боевик",
    ]
    .iter()
    .enumerate()
    .map(|(idx, name)| Genre {
        id: idx as i32 + 1,
        name: (*name).to_string(),
    })
    .collect()
}

fn seed_mpa() -> Vec<Mpa> {
    ["G", "PG", "PG-13", "R", "NC-17"]
        .iter()
        .enumerate()
        .map(|(idx, name)| Mpa {
            id: idx as i32 + 1,
            name: (*name).to_string(),
        })
        .collect()
}

impl MemoryFilmStorage {
    pub fn new(likes: Arc<MemoryLikes>) -> Self {
        Self {
            films: MemoryStore::new(),
            likes,
            genres: seed_genres(),
            mpa: seed_mpa(),
        }
    }

    /// Fills in genre and MPA names from the reference tables, mirroring the
    /// joins the relational backend performs. Unknown ids keep whatever name
    /// the caller supplied.
    fn resolve_references(&self, mut film: Film) -> Film {
        if let Some(mpa) = film.mpa.as_mut() {
            if let Some(known) = self.mpa.iter().find(|m| m.id == mpa.id) {
                mpa.name = known.name.clone();
            }
        }
        for genre in film.genres.iter_mut() {
            if let Some(known) = self.genres.iter().find(|g| g.id == genre.id) {
                genre.name = known.name.clone();
            }
        }
        film
    }
}

#[async_trait]
impl EntityStore<Film> for MemoryFilmStorage {
    async fn create(&self, film: Film) -> Result<Film> {
        self.films.insert_new(self.resolve_references(film))
    }

    async fn update(&self, film: Film) -> Result<Film> {
        self.films.replace(self.resolve_references(film))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Film>> {
        self.films.get(id)
    }

    async fn delete(&self, id: i32) -> Result<()> {
        self.films.remove(id)?;
        self.likes.remove_all_for_film(id)?;
        debug!(film_id = id, "deleted film and its likes");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Film>> {
        self.films.all()
    }
}

#[async_trait]
impl FilmStorage for MemoryFilmStorage {
    async fn add_like(&self, user_id: i32, film_id: i32) -> Result<()> {
        self.likes.add(film_id, user_id)
    }

    async fn remove_like(&self, user_id: i32, film_id: i32) -> Result<()> {
        self.likes.remove(film_id, user_id)
    }

    async fn films_by_likes(&self, offset: i64, limit: i64) -> Result<Vec<Film>> {
        let counts = self.likes.counts_by_film()?;
        // `all` returns ascending-id order, so a stable sort on descending
        // count alone keeps the ascending-id tie-break.
        let mut ranked = self.films.all()?;
        ranked.sort_by_key(|film| {
            std::cmp::Reverse(film.id.map_or(0, |id| *counts.get(&id).unwrap_or(&0)))
        });
        Ok(ranked
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn all_genres(&self) -> Result<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn genre_by_id(&self, id: i32) -> Result<Option<Genre>> {
        Ok(self.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn all_mpa(&self) -> Result<Vec<Mpa>> {
        Ok(self.mpa.clone())
    }

    async fn mpa_by_id(&self, id: i32) -> Result<Option<Mpa>> {
        Ok(self.mpa.iter().find(|m| m.id == id).cloned())
    }
}
