use axum::Json;
use axum::extract::{Path, State};
use filmorate_model::Mpa;

use crate::errors::AppResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Mpa>>> {
    Ok(Json(state.films.all_mpa().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Mpa>> {
    Ok(Json(state.films.mpa_by_id(id).await?))
}
