use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// MPA rating classification attached to a film (one per film).
///
/// Reference data: looked up by id, never mutated. Inbound payloads may carry
/// only the id; the storage layer resolves the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mpa {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

/// Genre tag attached to a film (many-to-many reference data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

/// A film record.
///
/// `id` is `None` until the store assigns one on create; callers may not
/// supply it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub mpa: Option<Mpa>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}
