use super::{Bookmark, Category, StoredFile, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relations that can be loaded together with a [`User`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRelation {
    Files,
    Bookmarks,
    Categories,
    Tags,
}

impl UserRelation {
    pub const ALL: [UserRelation; 4] = [
        UserRelation::Files,
        UserRelation::Bookmarks,
        UserRelation::Categories,
        UserRelation::Tags,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookmarksView {
    Grid,
    List,
}

/// Per-user preferences, stored as JSON on the user row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserSettings {
    pub theme: Theme,
    pub ui_animations: bool,
    pub bookmarks_view: BookmarksView,
    pub bookmarks_sorted_by: String,
    pub bookmarks_only_show_flagged: bool,
    pub bookmarks_only_show_read: bool,
    pub use_sidebar: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            ui_animations: true,
            bookmarks_view: BookmarksView::Grid,
            bookmarks_sorted_by: "created_desc".to_string(),
            bookmarks_only_show_flagged: false,
            bookmarks_only_show_read: false,
            use_sidebar: false,
        }
    }
}

/// Partial settings update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSettingsPatch {
    pub theme: Option<Theme>,
    pub ui_animations: Option<bool>,
    pub bookmarks_view: Option<BookmarksView>,
    pub bookmarks_sorted_by: Option<String>,
    pub bookmarks_only_show_flagged: Option<bool>,
    pub bookmarks_only_show_read: Option<bool>,
    pub use_sidebar: Option<bool>,
}

impl UserSettings {
    pub fn merge(mut self, patch: UserSettingsPatch) -> Self {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(v) = patch.ui_animations {
            self.ui_animations = v;
        }
        if let Some(view) = patch.bookmarks_view {
            self.bookmarks_view = view;
        }
        if let Some(sort) = patch.bookmarks_sorted_by {
            self.bookmarks_sorted_by = sort;
        }
        if let Some(v) = patch.bookmarks_only_show_flagged {
            self.bookmarks_only_show_flagged = v;
        }
        if let Some(v) = patch.bookmarks_only_show_read {
            self.bookmarks_only_show_read = v;
        }
        if let Some(v) = patch.use_sidebar {
            self.use_sidebar = v;
        }
        self
    }
}

/// User as handed to callers: no password hash, relations loaded on request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub settings: UserSettings,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub disabled: Option<DateTime<Utc>>,
    pub files: Vec<StoredFile>,
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// Raw user row, including the password hash
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub settings: UserSettings,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub disabled: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            name: self.name,
            is_admin: self.is_admin,
            settings: self.settings,
            created: self.created,
            updated: self.updated,
            disabled: self.disabled,
            files: Vec::new(),
            bookmarks: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }
}

/// Values for a new user; missing settings fall back to the defaults
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub settings: Option<UserSettings>,
}

/// Partial user update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
    pub settings: Option<UserSettings>,
    pub disabled: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminUserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created: DateTime<Utc>,
    pub disabled: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserCategoriesAndTags {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}
