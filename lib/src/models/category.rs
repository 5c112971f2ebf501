use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal view of a parent category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: Option<String>,
    pub color: String,
    /// The per-user fallback category bookmarks land in
    pub initial: bool,
    pub parent: Option<CategoryRef>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: Option<String>,
    pub color: String,
    pub initial: bool,
    pub parent_id: Option<i64>,
    /// Defaults to now when unset
    pub created: Option<DateTime<Utc>>,
}
