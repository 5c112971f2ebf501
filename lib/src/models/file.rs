use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file; the bytes live under the upload directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredFile {
    pub id: i64,
    pub owner_id: i64,
    pub file_name: String,
    /// Path below the upload root, always starting with the owner id
    pub relative_path: String,
    pub mime_type: Option<String>,
    pub size: i64,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewFile {
    pub file_name: String,
    pub relative_path: String,
    pub mime_type: Option<String>,
    pub size: i64,
}
