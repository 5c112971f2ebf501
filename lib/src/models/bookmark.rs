use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored bookmark
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub id: i64,
    pub owner_id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub category_id: Option<i64>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub category_id: Option<i64>,
    pub created: Option<DateTime<Utc>>,
}
