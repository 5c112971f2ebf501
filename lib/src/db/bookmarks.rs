use super::StashDb;
use crate::error::Result;
use crate::models::{Bookmark, NewBookmark};
use chrono::Utc;

impl StashDb {
    pub fn create_bookmark(&self, owner_id: i64, bookmark: NewBookmark) -> Result<i64> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO bookmarks (owner_id, url, title, description, icon, category_id, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            (
                owner_id,
                &bookmark.url,
                &bookmark.title,
                &bookmark.description,
                &bookmark.icon,
                bookmark.category_id,
                bookmark.created.unwrap_or(now),
                now,
            ),
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All bookmarks of a user in insertion order
    pub fn get_bookmarks_for_owner(&self, owner_id: i64) -> Result<Vec<Bookmark>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, url, title, description, icon, category_id, created, updated
             FROM bookmarks WHERE owner_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([owner_id], |row| {
            Ok(Bookmark {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                url: row.get(2)?,
                title: row.get(3)?,
                description: row.get(4)?,
                icon: row.get(5)?,
                category_id: row.get(6)?,
                created: row.get(7)?,
                updated: row.get(8)?,
            })
        })?;

        let mut bookmarks = Vec::new();
        for row in rows {
            bookmarks.push(row?);
        }
        Ok(bookmarks)
    }
}
