//! Service layer: validation, existence checks and computed views on top of
//! the storage ports.
//!
//! Every referenced id is resolved before a relationship mutation; when any
//! is absent the operation fails with `NotFound` before anything is touched.

mod films;
mod users;

pub use films::FilmService;
pub use users::UserService;

use crate::error::{Result, StoreError};

/// Ids are store-owned; a caller-supplied id on create is rejected.
fn ensure_store_assigned(id: Option<i32>) -> Result<()> {
    if id.is_some() {
        return Err(StoreError::Validation(
            "ИД присваивается хранилищем и не может быть задан вручную".to_string(),
        ));
    }
    Ok(())
}
