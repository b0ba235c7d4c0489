use std::sync::Arc;

use filmorate_core::service::{FilmService, UserService};
use filmorate_core::storage::memory::memory_backend;
use filmorate_core::storage::postgres::postgres_backend;
use sqlx::PgPool;

/// Shared application state: the two services, wired to whichever backend
/// was selected at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub films: Arc<FilmService>,
    pub users: Arc<UserService>,
}

impl AppState {
    /// State over the mutex-guarded in-memory backend.
    pub fn in_memory() -> Self {
        let (films, users) = memory_backend();
        let user_service = Arc::new(UserService::new(users));
        let film_service = Arc::new(FilmService::new(films, Arc::clone(&user_service)));
        Self {
            films: film_service,
            users: user_service,
        }
    }

    /// State over the Postgres backend. The caller is responsible for
    /// running migrations first.
    pub fn postgres(pool: PgPool) -> Self {
        let (films, users) = postgres_backend(pool);
        let user_service = Arc::new(UserService::new(users));
        let film_service = Arc::new(FilmService::new(films, Arc::clone(&user_service)));
        Self {
            films: film_service,
            users: user_service,
        }
    }
}
