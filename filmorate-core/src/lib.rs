//! Storage ports, backends and services for the Filmorate service.
//!
//! The crate is split the same way the HTTP surface is layered: `storage`
//! holds the ports plus the in-memory and Postgres implementations, and
//! `service` composes them with validation and existence checks.

pub mod error;
pub mod service;
pub mod storage;

pub use error::{Result, StoreError};

/// Embedded schema and reference-data migrations for the Postgres backend.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
