//! HTTP handlers, one module per resource. Handlers stay thin: extract,
//! delegate to a service, wrap the result.

pub mod films;
pub mod genres;
pub mod mpa;
pub mod users;
