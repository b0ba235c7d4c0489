use axum::Json;
use axum::extract::{Path, State};
use filmorate_model::User;

use crate::errors::AppResult;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.find_all().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<User>> {
    Ok(Json(state.users.get_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.create(user).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.update(user).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<()> {
    state.users.delete(id).await?;
    Ok(())
}

pub async fn friends(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.friends(id).await?))
}

pub async fn common_friends(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.common_friends(id, other_id).await?))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(i32, i32)>,
) -> AppResult<()> {
    state.users.add_friendship(id, friend_id).await?;
    Ok(())
}

pub async fn remove_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(i32, i32)>,
) -> AppResult<()> {
    state.users.remove_friendship(id, friend_id).await?;
    Ok(())
}
