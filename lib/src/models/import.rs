use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookmark produced by an import, not yet stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportedBookmark {
    pub title: String,
    /// `None` when the source link carried no URL
    pub url: Option<String>,
    pub description: String,
    /// Resolved by the persistence layer; importers leave it unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Category produced by an import, linked to its parent by slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportedCategory {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

pub type ImportedTag = String;

/// Flat output of an import.
///
/// The three lists are independent; slug references between them are only
/// resolved when the result is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportResult {
    pub bookmarks: Vec<ImportedBookmark>,
    pub categories: Vec<ImportedCategory>,
    pub tags: Vec<ImportedTag>,
}

impl ImportResult {
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty() && self.categories.is_empty() && self.tags.is_empty()
    }
}
