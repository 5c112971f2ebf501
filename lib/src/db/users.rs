use super::{StashDb, DEFAULT_CATEGORY_COLOR};
use crate::error::{Result, StashError};
use crate::models::{
    AdminUserSummary, NewCategory, NewUser, User, UserCategoriesAndTags, UserRecord,
    UserRelation, UserSettings, UserSettingsPatch, UserUpdate,
};
use crate::password;
use crate::slug::create_slug;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row};

const USER_COLUMNS: &str =
    "id, username, email, name, password_hash, is_admin, settings, created, updated, disabled";

fn user_record_from_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    let settings: String = row.get(6)?;
    let settings: UserSettings = serde_json::from_str(&settings)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(UserRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        password_hash: row.get(4)?,
        is_admin: row.get(5)?,
        settings,
        created: row.get(7)?,
        updated: row.get(8)?,
        disabled: row.get(9)?,
    })
}

impl StashDb {
    fn query_user_record<P>(&self, condition: &str, params: P) -> Result<Option<UserRecord>>
    where
        P: rusqlite::Params,
    {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, condition);
        let record = self
            .conn
            .query_row(&sql, params, user_record_from_row)
            .optional()?;
        Ok(record)
    }

    fn with_relations(&self, record: UserRecord, relations: &[UserRelation]) -> Result<User> {
        let mut user = record.into_user();

        for relation in relations {
            match relation {
                UserRelation::Files => user.files = self.get_files_for_owner(user.id)?,
                UserRelation::Bookmarks => user.bookmarks = self.get_bookmarks_for_owner(user.id)?,
                UserRelation::Categories => {
                    user.categories = self.get_categories_for_owner(user.id)?
                }
                UserRelation::Tags => user.tags = self.get_tags_for_owner(user.id)?,
            }
        }

        Ok(user)
    }

    fn require_user_record(&self, id: i64) -> Result<UserRecord> {
        self.query_user_record("id = ?1", [id])?
            .ok_or(StashError::UserNotFound(id))
    }

    pub fn get_user_by_id(&self, id: i64, relations: &[UserRelation]) -> Result<Option<User>> {
        match self.query_user_record("id = ?1", [id])? {
            Some(record) => Ok(Some(self.with_relations(record, relations)?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_username(
        &self,
        username: &str,
        relations: &[UserRelation],
    ) -> Result<Option<User>> {
        match self.query_user_record("username = ?1", [username])? {
            Some(record) => Ok(Some(self.with_relations(record, relations)?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_email(&self, email: &str, relations: &[UserRelation]) -> Result<Option<User>> {
        match self.query_user_record("email = ?1", [email])? {
            Some(record) => Ok(Some(self.with_relations(record, relations)?)),
            None => Ok(None),
        }
    }

    /// Raw user row whose username or email equals `login`
    pub fn find_user_record(&self, login: &str) -> Result<Option<UserRecord>> {
        self.query_user_record("username = ?1 OR email = ?1", [login])
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User> {
        let settings = serde_json::to_string(&new_user.settings.unwrap_or_default())?;
        let now = Utc::now();

        self.conn.execute(
            "INSERT INTO users (username, email, name, password_hash, is_admin, settings, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            (
                &new_user.username,
                &new_user.email,
                &new_user.name,
                &new_user.password_hash,
                new_user.is_admin,
                &settings,
                now,
            ),
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Created user {} ({})", new_user.username, id);

        Ok(self.require_user_record(id)?.into_user())
    }

    /// Create the `admin` account together with its initial category
    pub fn create_root_admin_user(&self, email: &str, password: &str) -> Result<User> {
        let password_hash = password::hash_password(password)?;

        let tx = self.conn.unchecked_transaction()?;

        let user = self.create_user(NewUser {
            username: "admin".to_string(),
            name: "Root Admin".to_string(),
            email: email.to_string(),
            password_hash,
            is_admin: true,
            settings: None,
        })?;

        self.create_category(
            user.id,
            NewCategory {
                name: "Uncategorized".to_string(),
                slug: create_slug("uncategorized"),
                color: DEFAULT_CATEGORY_COLOR.to_string(),
                initial: true,
                ..Default::default()
            },
        )?;

        tx.commit()?;
        log::info!("Created root admin user {}", email);
        Ok(user)
    }

    pub fn update_user(&self, id: i64, update: UserUpdate) -> Result<User> {
        let settings = update
            .settings
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let now = Utc::now();

        let mut updates = vec!["updated = :updated"];
        let mut params: Vec<(&str, &dyn rusqlite::ToSql)> = Vec::new();
        params.push((":updated", &now));

        if let Some(username) = &update.username {
            updates.push("username = :username");
            params.push((":username", username));
        }
        if let Some(email) = &update.email {
            updates.push("email = :email");
            params.push((":email", email));
        }
        if let Some(name) = &update.name {
            updates.push("name = :name");
            params.push((":name", name));
        }
        if let Some(password_hash) = &update.password_hash {
            updates.push("password_hash = :password_hash");
            params.push((":password_hash", password_hash));
        }
        if let Some(is_admin) = &update.is_admin {
            updates.push("is_admin = :is_admin");
            params.push((":is_admin", is_admin));
        }
        if let Some(settings) = &settings {
            updates.push("settings = :settings");
            params.push((":settings", settings));
        }
        if let Some(disabled) = &update.disabled {
            updates.push("disabled = :disabled");
            params.push((":disabled", disabled));
        }

        params.push((":id", &id));
        let query = format!("UPDATE users SET {} WHERE id = :id", updates.join(", "));

        let affected = self.conn.execute(&query, params.as_slice())?;
        if affected == 0 {
            return Err(StashError::UserNotFound(id));
        }

        Ok(self.require_user_record(id)?.into_user())
    }

    pub fn get_user_settings(&self, id: i64) -> Result<UserSettings> {
        Ok(self.require_user_record(id)?.settings)
    }

    pub fn update_user_settings(&self, id: i64, patch: UserSettingsPatch) -> Result<User> {
        let settings = self.get_user_settings(id)?.merge(patch);
        self.update_user(
            id,
            UserUpdate {
                settings: Some(settings),
                ..Default::default()
            },
        )
    }

    pub fn update_user_password(&self, id: i64, password_hash: &str) -> Result<User> {
        self.update_user(
            id,
            UserUpdate {
                password_hash: Some(password_hash.to_string()),
                ..Default::default()
            },
        )
    }

    /// Delete a user and everything they own
    pub fn delete_user(&self, id: i64) -> Result<()> {
        self.conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(())
    }

    pub fn get_user_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(id) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Categories (newest first, with parent) and tags (by name, with bookmarks) of a user
    pub fn fetch_user_category_and_tags(&self, id: i64) -> Result<UserCategoriesAndTags> {
        if self.query_user_record("id = ?1", [id])?.is_none() {
            return Ok(UserCategoriesAndTags::default());
        }

        Ok(UserCategoriesAndTags {
            categories: self.get_categories_for_owner(id)?,
            tags: self.get_tags_for_owner(id)?,
        })
    }

    pub fn get_users_for_admin_panel(&self) -> Result<Vec<AdminUserSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, email, created, disabled FROM users ORDER BY created DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AdminUserSummary {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                created: row.get(3)?,
                disabled: row.get(4)?,
            })
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    pub fn is_user_disabled(&self, id: i64) -> Result<bool> {
        let disabled: Option<Option<DateTime<Utc>>> = self
            .conn
            .query_row("SELECT disabled FROM users WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        match disabled {
            Some(disabled) => Ok(disabled.is_some()),
            None => Err(StashError::UserNotFound(id)),
        }
    }

    pub fn disable_user(&self, id: i64) -> Result<User> {
        self.update_user(
            id,
            UserUpdate {
                disabled: Some(Some(Utc::now())),
                ..Default::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{create_test_user, setup_test_db};
    use crate::models::user::Theme;
    use crate::models::{NewBookmark, NewFile};
    use rstest::rstest;

    #[test]
    fn test_create_user_uses_default_settings() {
        let db = setup_test_db();
        let user = create_test_user(&db, "alice");

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.is_admin);
        assert_eq!(user.settings, UserSettings::default());
        assert!(user.disabled.is_none());
        assert!(user.categories.is_empty());
    }

    #[test]
    fn test_create_user_duplicate_username() {
        let db = setup_test_db();
        create_test_user(&db, "alice");

        let result = db.create_user(NewUser {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(StashError::Database(_))));
    }

    #[rstest]
    #[case("alice")]
    #[case("alice@example.com")]
    fn test_find_user_record_by_username_or_email(#[case] login: &str) {
        let db = setup_test_db();
        create_test_user(&db, "alice");
        create_test_user(&db, "bob");

        let record = db.find_user_record(login).unwrap().unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.password_hash, "hash");
    }

    #[test]
    fn test_find_user_record_unknown() {
        let db = setup_test_db();
        assert!(db.find_user_record("nobody").unwrap().is_none());
    }

    #[test]
    fn test_get_user_lookups() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");

        let by_id = db.get_user_by_id(alice.id, &[]).unwrap().unwrap();
        let by_name = db.get_user_by_username("alice", &[]).unwrap().unwrap();
        let by_email = db.get_user_by_email("alice@example.com", &[]).unwrap().unwrap();

        assert_eq!(by_id, by_name);
        assert_eq!(by_id, by_email);
        assert!(db.get_user_by_id(999, &[]).unwrap().is_none());
        assert!(db.get_user_by_username("nobody", &[]).unwrap().is_none());
    }

    #[test]
    fn test_get_user_loads_requested_relations_only() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        db.create_bookmark(
            alice.id,
            NewBookmark {
                url: "https://example.com".to_string(),
                title: "Example".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        db.create_file(
            alice.id,
            NewFile {
                file_name: "a.png".to_string(),
                relative_path: format!("{}/a.png", alice.id),
                ..Default::default()
            },
        )
        .unwrap();

        let user = db
            .get_user_by_id(alice.id, &[UserRelation::Bookmarks])
            .unwrap()
            .unwrap();
        assert_eq!(user.bookmarks.len(), 1);
        assert!(user.files.is_empty());

        let user = db
            .get_user_by_id(alice.id, &UserRelation::ALL)
            .unwrap()
            .unwrap();
        assert_eq!(user.bookmarks.len(), 1);
        assert_eq!(user.files.len(), 1);
    }

    #[test]
    fn test_create_root_admin_user() {
        let db = setup_test_db();
        let admin = db
            .create_root_admin_user("root@example.com", "correct horse")
            .unwrap();

        assert_eq!(admin.username, "admin");
        assert_eq!(admin.name, "Root Admin");
        assert!(admin.is_admin);

        let record = db.find_user_record("root@example.com").unwrap().unwrap();
        assert!(record.password_hash.starts_with("$argon2id$"));
        assert_ne!(record.password_hash, "correct horse");

        let initial = db.get_initial_category(admin.id).unwrap().unwrap();
        assert_eq!(initial.name, "Uncategorized");
        assert_eq!(initial.slug, "uncategorized");
        assert_eq!(initial.color, "#ccc");
    }

    #[test]
    fn test_update_user_bumps_updated() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");

        let updated = db
            .update_user(
                alice.id,
                UserUpdate {
                    name: Some("Alice Liddell".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Alice Liddell");
        assert_eq!(updated.username, "alice");
        assert!(updated.updated >= alice.updated);
    }

    #[test]
    fn test_update_missing_user() {
        let db = setup_test_db();
        let result = db.update_user(42, UserUpdate::default());
        assert!(matches!(result, Err(StashError::UserNotFound(42))));
    }

    #[test]
    fn test_update_user_settings_merges() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");

        db.update_user_settings(
            alice.id,
            UserSettingsPatch {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .unwrap();
        let user = db
            .update_user_settings(
                alice.id,
                UserSettingsPatch {
                    use_sidebar: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(user.settings.theme, Theme::Dark);
        assert!(user.settings.use_sidebar);
        assert_eq!(db.get_user_settings(alice.id).unwrap(), user.settings);
    }

    #[test]
    fn test_update_user_password() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");

        db.update_user_password(alice.id, "new-hash").unwrap();
        let record = db.find_user_record("alice").unwrap().unwrap();
        assert_eq!(record.password_hash, "new-hash");
    }

    #[test]
    fn test_delete_user_and_count() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        create_test_user(&db, "bob");
        assert_eq!(db.get_user_count().unwrap(), 2);

        db.delete_user(alice.id).unwrap();
        assert_eq!(db.get_user_count().unwrap(), 1);
        assert!(db.get_user_by_id(alice.id, &[]).unwrap().is_none());
    }

    #[test]
    fn test_disable_user() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        assert!(!db.is_user_disabled(alice.id).unwrap());

        let disabled = db.disable_user(alice.id).unwrap();
        assert!(disabled.disabled.is_some());
        assert!(db.is_user_disabled(alice.id).unwrap());
        assert!(matches!(
            db.is_user_disabled(999),
            Err(StashError::UserNotFound(999))
        ));
    }

    #[test]
    fn test_users_for_admin_panel() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        let bob = create_test_user(&db, "bob");
        let carol = create_test_user(&db, "carol");
        for (id, secs) in [(alice.id, 3_000), (bob.id, 1_000), (carol.id, 1_000)] {
            db.conn
                .execute(
                    "UPDATE users SET created = ?1 WHERE id = ?2",
                    (DateTime::from_timestamp(secs, 0).unwrap(), id),
                )
                .unwrap();
        }

        let users = db.get_users_for_admin_panel().unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol", "bob"]);
        assert_eq!(users[0].created, DateTime::from_timestamp(3_000, 0).unwrap());
    }

    #[test]
    fn test_fetch_user_category_and_tags() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        let parent = db
            .create_category(
                alice.id,
                NewCategory {
                    name: "Parent".to_string(),
                    slug: "parent".to_string(),
                    created: DateTime::from_timestamp(1_000, 0),
                    ..Default::default()
                },
            )
            .unwrap();
        db.create_category(
            alice.id,
            NewCategory {
                name: "Child".to_string(),
                slug: "child".to_string(),
                parent_id: Some(parent.id),
                created: DateTime::from_timestamp(2_000, 0),
                ..Default::default()
            },
        )
        .unwrap();
        db.get_or_create_tag(alice.id, "zeta").unwrap();
        db.get_or_create_tag(alice.id, "alpha").unwrap();

        let result = db.fetch_user_category_and_tags(alice.id).unwrap();

        let categories: Vec<&str> = result.categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(categories, vec!["child", "parent"]);
        assert_eq!(
            result.categories[0].parent.as_ref().map(|p| p.slug.as_str()),
            Some("parent")
        );

        let tags: Vec<&str> = result.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_fetch_user_category_and_tags_unknown_user() {
        let db = setup_test_db();
        let result = db.fetch_user_category_and_tags(7).unwrap();
        assert!(result.categories.is_empty());
        assert!(result.tags.is_empty());
    }
}
