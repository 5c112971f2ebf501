use super::StashDb;
use crate::error::Result;
use crate::models::Tag;
use crate::slug::create_slug;
use chrono::Utc;
use rusqlite::OptionalExtension;

impl StashDb {
    fn bookmark_ids_for_tag(&self, tag_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT bookmark_id FROM bookmark_tags WHERE tag_id = ?1 ORDER BY bookmark_id")?;
        let rows = stmt.query_map([tag_id], |row| row.get(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    pub fn get_or_create_tag(&self, owner_id: i64, name: &str) -> Result<Tag> {
        let existing: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, slug FROM tags WHERE owner_id = ?1 AND name = ?2",
                (owner_id, name),
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (id, slug) = match existing {
            Some(found) => found,
            None => {
                let slug = create_slug(name);
                self.conn.execute(
                    "INSERT INTO tags (owner_id, name, slug, created) VALUES (?1, ?2, ?3, ?4)",
                    (owner_id, name, &slug, Utc::now()),
                )?;
                (self.conn.last_insert_rowid(), slug)
            }
        };

        Ok(Tag {
            id,
            owner_id,
            name: name.to_string(),
            slug,
            bookmarks: self.bookmark_ids_for_tag(id)?,
        })
    }

    pub fn tag_bookmark(&self, bookmark_id: i64, tag_id: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO bookmark_tags (bookmark_id, tag_id) VALUES (?1, ?2)",
            (bookmark_id, tag_id),
        )?;
        Ok(())
    }

    /// All tags of a user ordered by name, each with its bookmark ids
    pub fn get_tags_for_owner(&self, owner_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, slug FROM tags WHERE owner_id = ?1 ORDER BY name ASC")?;
        let rows = stmt.query_map([owner_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut tags = Vec::new();
        for row in rows {
            let (id, name, slug) = row?;
            tags.push(Tag {
                id,
                owner_id,
                name,
                slug,
                bookmarks: self.bookmark_ids_for_tag(id)?,
            });
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::{create_test_user, setup_test_db};
    use crate::models::NewBookmark;

    #[test]
    fn test_get_or_create_tag_is_stable() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");

        let first = db.get_or_create_tag(alice.id, "Rust Lang").unwrap();
        let second = db.get_or_create_tag(alice.id, "Rust Lang").unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.slug, "rust-lang");
        assert_eq!(db.get_tags_for_owner(alice.id).unwrap().len(), 1);
    }

    #[test]
    fn test_tag_bookmark_lists_bookmark_ids() {
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        let tag = db.get_or_create_tag(alice.id, "reading").unwrap();
        let bookmark_id = db
            .create_bookmark(
                alice.id,
                NewBookmark {
                    url: "https://example.com".to_string(),
                    title: "Example".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        db.tag_bookmark(bookmark_id, tag.id).unwrap();
        db.tag_bookmark(bookmark_id, tag.id).unwrap();

        let tags = db.get_tags_for_owner(alice.id).unwrap();
        assert_eq!(tags[0].bookmarks, vec![bookmark_id]);
    }
}
