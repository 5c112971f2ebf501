use super::{StashDb, DEFAULT_CATEGORY_COLOR};
use crate::error::{Result, StashError};
use crate::models::{Category, CategoryRef, NewCategory};
use crate::slug::create_slug;
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

const CATEGORY_SELECT: &str = "SELECT c.id, c.owner_id, c.name, c.slug, c.description, c.icon, c.color,
        c.initial, c.created, c.updated, p.id, p.name, p.slug
    FROM categories c
    LEFT JOIN categories p ON p.id = c.parent_id";

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    let parent_id: Option<i64> = row.get(10)?;
    let parent = match parent_id {
        Some(id) => Some(CategoryRef {
            id,
            name: row.get(11)?,
            slug: row.get(12)?,
        }),
        None => None,
    };

    Ok(Category {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        slug: row.get(3)?,
        description: row.get(4)?,
        icon: row.get(5)?,
        color: row.get(6)?,
        initial: row.get(7)?,
        parent,
        created: row.get(8)?,
        updated: row.get(9)?,
    })
}

impl StashDb {
    pub fn create_category(&self, owner_id: i64, category: NewCategory) -> Result<Category> {
        let now = Utc::now();
        let created = category.created.unwrap_or(now);
        let color = if category.color.is_empty() {
            DEFAULT_CATEGORY_COLOR.to_string()
        } else {
            category.color
        };

        self.conn.execute(
            "INSERT INTO categories (owner_id, name, slug, description, icon, color, initial, parent_id, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            (
                owner_id,
                &category.name,
                &category.slug,
                &category.description,
                &category.icon,
                &color,
                category.initial,
                category.parent_id,
                created,
                now,
            ),
        )?;
        let id = self.conn.last_insert_rowid();

        self.get_category_by_id(id)?
            .ok_or_else(|| StashError::Other(format!("Category {} vanished after insert", id)))
    }

    pub fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let sql = format!("{} WHERE c.id = ?1", CATEGORY_SELECT);
        let category = self
            .conn
            .query_row(&sql, [id], category_from_row)
            .optional()?;
        Ok(category)
    }

    pub fn get_category_by_slug(&self, owner_id: i64, slug: &str) -> Result<Option<Category>> {
        let sql = format!("{} WHERE c.owner_id = ?1 AND c.slug = ?2", CATEGORY_SELECT);
        let category = self
            .conn
            .query_row(&sql, (owner_id, slug), category_from_row)
            .optional()?;
        Ok(category)
    }

    pub fn get_initial_category(&self, owner_id: i64) -> Result<Option<Category>> {
        let sql = format!(
            "{} WHERE c.owner_id = ?1 AND c.initial = 1 ORDER BY c.id LIMIT 1",
            CATEGORY_SELECT
        );
        let category = self
            .conn
            .query_row(&sql, [owner_id], category_from_row)
            .optional()?;
        Ok(category)
    }

    /// The category bookmarks without one end up in, created on first use
    pub fn ensure_initial_category(&self, owner_id: i64) -> Result<Category> {
        if let Some(category) = self.get_initial_category(owner_id)? {
            return Ok(category);
        }

        let slug = create_slug("uncategorized");
        if let Some(category) = self.get_category_by_slug(owner_id, &slug)? {
            return Ok(category);
        }

        self.create_category(
            owner_id,
            NewCategory {
                name: "Uncategorized".to_string(),
                slug,
                color: DEFAULT_CATEGORY_COLOR.to_string(),
                initial: true,
                ..Default::default()
            },
        )
    }

    /// All categories of a user, newest first
    pub fn get_categories_for_owner(&self, owner_id: i64) -> Result<Vec<Category>> {
        let sql = format!(
            "{} WHERE c.owner_id = ?1 ORDER BY c.created DESC, c.id DESC",
            CATEGORY_SELECT
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([owner_id], category_from_row)?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }
}
