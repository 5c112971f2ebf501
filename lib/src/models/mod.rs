pub mod bookmark;
pub mod category;
pub mod file;
pub mod import;
pub mod tag;
pub mod user;

pub use bookmark::{Bookmark, NewBookmark};
pub use category::{Category, CategoryRef, NewCategory};
pub use file::{NewFile, StoredFile};
pub use import::{ImportResult, ImportedBookmark, ImportedCategory, ImportedTag};
pub use tag::Tag;
pub use user::{
    AdminUserSummary, NewUser, User, UserCategoriesAndTags, UserRecord, UserRelation,
    UserSettings, UserSettingsPatch, UserUpdate,
};
