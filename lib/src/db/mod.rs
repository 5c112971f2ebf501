//! SQLite persistence for users, categories, tags, bookmarks and files.
//!
//! [`StashDb`] owns a single connection; the repository operations are split
//! over the submodules as `impl StashDb` blocks.

mod bookmarks;
mod categories;
mod files;
mod import;
mod tags;
mod users;

pub use import::ImportSummary;

use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Color given to categories created without an explicit one
pub const DEFAULT_CATEGORY_COLOR: &str = "#ccc";

pub struct StashDb {
    conn: Connection,
    db_path: PathBuf,
}

impl StashDb {
    pub fn init_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        db.setup_tables()?;
        Ok(db)
    }

    pub fn init(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn,
            db_path: db_path.to_path_buf(),
        };
        db.setup_tables()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn get_path(&self) -> &Path {
        &self.db_path
    }

    fn setup_tables(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id integer PRIMARY KEY,
                username text NOT NULL UNIQUE,
                email text NOT NULL UNIQUE,
                name text NOT NULL,
                password_hash text NOT NULL,
                is_admin integer NOT NULL DEFAULT 0,
                settings text NOT NULL DEFAULT '{}',
                disabled text DEFAULT NULL,
                created text NOT NULL,
                updated text NOT NULL
            );

            CREATE TABLE IF NOT EXISTS categories (
                id integer PRIMARY KEY,
                owner_id integer NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name text NOT NULL,
                slug text NOT NULL,
                description text NOT NULL DEFAULT '',
                icon text DEFAULT NULL,
                color text NOT NULL DEFAULT '#ccc',
                initial integer NOT NULL DEFAULT 0,
                parent_id integer DEFAULT NULL REFERENCES categories(id) ON DELETE SET NULL,
                created text NOT NULL,
                updated text NOT NULL,
                UNIQUE (owner_id, slug)
            );

            CREATE TABLE IF NOT EXISTS tags (
                id integer PRIMARY KEY,
                owner_id integer NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name text NOT NULL,
                slug text NOT NULL,
                created text NOT NULL,
                UNIQUE (owner_id, name)
            );

            CREATE TABLE IF NOT EXISTS bookmarks (
                id integer PRIMARY KEY,
                owner_id integer NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                url text NOT NULL,
                title text NOT NULL,
                description text NOT NULL DEFAULT '',
                icon text DEFAULT NULL,
                category_id integer DEFAULT NULL REFERENCES categories(id) ON DELETE SET NULL,
                created text NOT NULL,
                updated text NOT NULL
            );

            CREATE TABLE IF NOT EXISTS bookmark_tags (
                bookmark_id integer NOT NULL REFERENCES bookmarks(id) ON DELETE CASCADE,
                tag_id integer NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                PRIMARY KEY (bookmark_id, tag_id)
            );

            CREATE TABLE IF NOT EXISTS files (
                id integer PRIMARY KEY,
                owner_id integer NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                file_name text NOT NULL,
                relative_path text NOT NULL,
                mime_type text DEFAULT NULL,
                size integer NOT NULL DEFAULT 0,
                created text NOT NULL,
                UNIQUE (owner_id, relative_path)
            );

            CREATE INDEX IF NOT EXISTS idx_bookmarks_owner ON bookmarks(owner_id);
            CREATE INDEX IF NOT EXISTS idx_categories_owner ON categories(owner_id);",
        )?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_on_disk_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("stash.db");

        {
            let db = StashDb::init(&db_path).unwrap();
            test_support::create_test_user(&db, "alice");
        }

        let db = StashDb::init(&db_path).unwrap();
        assert_eq!(db.get_path(), db_path.as_path());
        assert_eq!(db.get_user_count().unwrap(), 1);
    }
}
