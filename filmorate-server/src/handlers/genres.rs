use axum::Json;
use axum::extract::{Path, State};
use filmorate_model::Genre;

use crate::errors::AppResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.films.all_genres().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Genre>> {
    Ok(Json(state.films.genre_by_id(id).await?))
}
