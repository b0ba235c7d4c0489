use axum::Json;
use axum::extract::{Path, Query, State};
use filmorate_model::Film;
use serde::Deserialize;

use crate::errors::AppResult;
use crate::state::AppState;

const DEFAULT_POPULAR_COUNT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    count: Option<i64>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Film>>> {
    Ok(Json(state.films.find_all().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Film>> {
    Ok(Json(state.films.get_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(film): Json<Film>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.create(film).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Json(film): Json<Film>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.films.update(film).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<()> {
    state.films.delete(id).await?;
    Ok(())
}

pub async fn add_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i32, i32)>,
) -> AppResult<()> {
    state.films.add_like(user_id, film_id).await?;
    Ok(())
}

pub async fn remove_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i32, i32)>,
) -> AppResult<()> {
    state.films.remove_like(user_id, film_id).await?;
    Ok(())
}

pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<Json<Vec<Film>>> {
    let count = params.count.unwrap_or(DEFAULT_POPULAR_COUNT);
    Ok(Json(state.films.popular(count).await?))
}
