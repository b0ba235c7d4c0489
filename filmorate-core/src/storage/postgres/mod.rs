//! Postgres backend.
//!
//! Parameterized runtime-checked queries against one table per entity type;
//! rows are mapped back into model types by hand. Multi-statement mutations
//! (film create/update with genre links, cascading deletes) run inside a
//! single transaction.

mod films;
mod users;

pub use films::PostgresFilmStorage;
pub use users::PostgresUserStorage;

use std::sync::Arc;

use sqlx::PgPool;

/// Builds the complete Postgres backend over one shared pool.
pub fn postgres_backend(pool: PgPool) -> (Arc<PostgresFilmStorage>, Arc<PostgresUserStorage>) {
    (
        Arc::new(PostgresFilmStorage::new(pool.clone())),
        Arc::new(PostgresUserStorage::new(pool)),
    )
}
