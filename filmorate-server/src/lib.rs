//! # Filmorate Server
//!
//! REST backend for films and users with likes, friendships and the
//! genre/MPA reference tables.
//!
//! Built on Axum, with two interchangeable storage backends behind the core
//! ports: an in-memory backend for development and tests, and PostgreSQL
//! for real deployments.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use state::AppState;
