use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `name` falls back to `login` when left empty at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Derived mutual-friendship marker, populated only on friend-list
    /// projections. Never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_friend: Option<bool>,
}
