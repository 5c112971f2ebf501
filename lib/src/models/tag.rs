use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub slug: String,
    /// Ids of the bookmarks carrying this tag
    pub bookmarks: Vec<i64>,
}
