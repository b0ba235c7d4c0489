//! Core data model definitions shared across Filmorate crates.

pub mod error;
pub mod film;
pub mod user;
pub mod validate;

pub use error::ValidationError;
pub use film::{Film, Genre, Mpa};
pub use user::User;
pub use validate::{validate_film, validate_user};
