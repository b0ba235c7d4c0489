use async_trait::async_trait;
use filmorate_model::{Film, Genre, Mpa};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::storage::{EntityStore, FilmStorage};

const FILM_SELECT: &str = "SELECT f.film_id, f.name, f.description, f.release_date, f.duration, \
     m.mpa_id, m.name AS mpa_name \
     FROM film AS f \
     LEFT JOIN mpa AS m ON f.mpa_id = m.mpa_id";

/// Postgres-backed implementation of the `FilmStorage` port.
#[derive(Clone, Debug)]
pub struct PostgresFilmStorage {
    pool: PgPool,
}

fn film_from_row(row: &PgRow) -> Result<Film> {
    let mpa = match row.try_get::<Option<i32>, _>("mpa_id")? {
        Some(id) => Some(Mpa {
            id,
            name: row
                .try_get::<Option<String>, _>("mpa_name")?
                .unwrap_or_default(),
        }),
        None => None,
    };
    Ok(Film {
        id: Some(row.try_get("film_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        release_date: row.try_get("release_date")?,
        duration: row.try_get("duration")?,
        mpa,
        genres: Vec::new(),
    })
}

fn genre_from_row(row: &PgRow) -> Result<Genre> {
    Ok(Genre {
        id: row.try_get("genre_id")?,
        name: row.try_get("name")?,
    })
}

impl PostgresFilmStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_genres(&self, film_id: i32) -> Result<Vec<Genre>> {
        let rows = sqlx::query(
            "SELECT g.genre_id, g.name \
             FROM film_genres AS fg \
             JOIN genre AS g ON g.genre_id = fg.genre_id \
             WHERE fg.film_id = $1 \
             ORDER BY g.genre_id",
        )
        .bind(film_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(genre_from_row).collect()
    }

    async fn populate(&self, mut film: Film) -> Result<Film> {
        if let Some(id) = film.id {
            film.genres = self.load_genres(id).await?;
        }
        Ok(film)
    }

    async fn insert_genre_links(
        tx: &mut Transaction<'_, Postgres>,
        film_id: i32,
        genres: &[Genre],
    ) -> Result<()> {
        for genre in genres {
            sqlx::query("INSERT INTO film_genres (film_id, genre_id) VALUES ($1, $2)")
                .bind(film_id)
                .bind(genre.id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore<Film> for PostgresFilmStorage {
    async fn create(&self, film: Film) -> Result<Film> {
        let mut tx = self.pool.begin().await?;
        let film_id: i32 = sqlx::query_scalar(
            "INSERT INTO film (name, description, release_date, duration, mpa_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING film_id",
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa.as_ref().map(|m| m.id))
        .fetch_one(&mut *tx)
        .await?;
        Self::insert_genre_links(&mut tx, film_id, &film.genres).await?;
        tx.commit().await?;

        debug!(film_id, name = %film.name, "created film");
        self.get_by_id(film_id)
            .await?
            .ok_or_else(|| StoreError::Internal("created film vanished".to_string()))
    }

    async fn update(&self, film: Film) -> Result<Film> {
        let film_id = film.id.ok_or(StoreError::NotFound)?;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE film \
             SET name = $2, description = $3, release_date = $4, duration = $5, mpa_id = $6 \
             WHERE film_id = $1",
        )
        .bind(film_id)
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa.as_ref().map(|m| m.id))
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        // Full-replace semantics extend to genre links.
        sqlx::query("DELETE FROM film_genres WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut *tx)
            .await?;
        Self::insert_genre_links(&mut tx, film_id, &film.genres).await?;
        tx.commit().await?;

        debug!(film_id, "updated film");
        self.get_by_id(film_id)
            .await?
            .ok_or_else(|| StoreError::Internal("updated film vanished".to_string()))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Film>> {
        let row = sqlx::query(&format!("{FILM_SELECT} WHERE f.film_id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(self.populate(film_from_row(&row)?).await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM film_genres WHERE film_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM favorite_films WHERE film_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM film WHERE film_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!(film_id = id, "deleted film and its likes");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Film>> {
        let rows = sqlx::query(&format!("{FILM_SELECT} ORDER BY f.film_id"))
            .fetch_all(&self.pool)
            .await?;
        let mut films = Vec::with_capacity(rows.len());
        for row in &rows {
            films.push(self.populate(film_from_row(row)?).await?);
        }
        Ok(films)
    }
}

#[async_trait]
impl FilmStorage for PostgresFilmStorage {
    async fn add_like(&self, user_id: i32, film_id: i32) -> Result<()> {
        sqlx::query(
            "INSERT INTO favorite_films (film_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(film_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_like(&self, user_id: i32, film_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM favorite_films WHERE film_id = $1 AND user_id = $2")
            .bind(film_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn films_by_likes(&self, offset: i64, limit: i64) -> Result<Vec<Film>> {
        let rows = sqlx::query(
            "SELECT f.film_id, f.name, f.description, f.release_date, f.duration, \
             m.mpa_id, m.name AS mpa_name, COUNT(ff.user_id) AS likes \
             FROM film AS f \
             LEFT JOIN mpa AS m ON f.mpa_id = m.mpa_id \
             LEFT JOIN favorite_films AS ff ON ff.film_id = f.film_id \
             GROUP BY f.film_id, m.mpa_id, m.name \
             ORDER BY likes DESC, f.film_id ASC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        let mut films = Vec::with_capacity(rows.len());
        for row in &rows {
            films.push(self.populate(film_from_row(row)?).await?);
        }
        Ok(films)
    }

    async fn all_genres(&self) -> Result<Vec<Genre>> {
        let rows = sqlx::query("SELECT genre_id, name FROM genre ORDER BY genre_id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(genre_from_row).collect()
    }

    async fn genre_by_id(&self, id: i32) -> Result<Option<Genre>> {
        let row = sqlx::query("SELECT genre_id, name FROM genre WHERE genre_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(genre_from_row).transpose()
    }

    async fn all_mpa(&self) -> Result<Vec<Mpa>> {
        let rows = sqlx::query("SELECT mpa_id, name FROM mpa ORDER BY mpa_id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| {
                Ok(Mpa {
                    id: row.try_get("mpa_id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    async fn mpa_by_id(&self, id: i32) -> Result<Option<Mpa>> {
        let row = sqlx::query("SELECT mpa_id, name FROM mpa WHERE mpa_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| {
            Ok(Mpa {
                id: row.try_get("mpa_id")?,
                name: row.try_get("name")?,
            })
        })
        .transpose()
    }
}
