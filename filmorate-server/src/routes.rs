use axum::Router;
use axum::routing::{get, put};
use tower_http::trace::TraceLayer;

use crate::handlers::{films, genres, mpa, users};
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/films",
            get(films::list).post(films::create).put(films::update),
        )
        .route("/films/popular", get(films::popular))
        .route("/films/{id}", get(films::get).delete(films::delete))
        .route(
            "/films/{id}/like/{userId}",
            put(films::add_like).delete(films::remove_like),
        )
        .route(
            "/users",
            get(users::list).post(users::create).put(users::update),
        )
        .route("/users/{id}", get(users::get).delete(users::delete))
        .route("/users/{id}/friends", get(users::friends))
        .route(
            "/users/{id}/friends/common/{otherId}",
            get(users::common_friends),
        )
        .route(
            "/users/{id}/friends/{friendId}",
            put(users::add_friend).delete(users::remove_friend),
        )
        .route("/genres", get(genres::list))
        .route("/genres/{id}", get(genres::get))
        .route("/mpa", get(mpa::list))
        .route("/mpa/{id}", get(mpa::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
