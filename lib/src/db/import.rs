use super::StashDb;
use crate::error::{Result, StashError};
use crate::models::{ImportResult, NewBookmark, NewCategory};
use serde::Serialize;
use std::collections::HashMap;

/// Counts reported after an import result has been stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub categories_created: usize,
    pub categories_reused: usize,
    pub bookmarks_created: usize,
    pub bookmarks_skipped: usize,
    pub tags_ensured: usize,
}

impl StashDb {
    fn resolve_category_slug(
        &self,
        owner_id: i64,
        slug: &str,
        known: &HashMap<String, i64>,
    ) -> Result<Option<i64>> {
        if let Some(id) = known.get(slug) {
            return Ok(Some(*id));
        }
        Ok(self.get_category_by_slug(owner_id, slug)?.map(|c| c.id))
    }

    /// Store an import result for `owner_id` in a single transaction.
    ///
    /// Categories whose slug already exists for the owner are reused. Bookmarks
    /// without a category go to the owner's initial category, and bookmarks
    /// without a URL are skipped.
    pub fn persist_import(&self, owner_id: i64, result: &ImportResult) -> Result<ImportSummary> {
        let tx = self.conn.unchecked_transaction()?;

        if self.get_user_by_id(owner_id, &[])?.is_none() {
            return Err(StashError::UserNotFound(owner_id));
        }

        let mut summary = ImportSummary::default();
        let mut slugs: HashMap<String, i64> = HashMap::new();

        for category in &result.categories {
            if let Some(existing) = self.get_category_by_slug(owner_id, &category.slug)? {
                slugs.insert(category.slug.clone(), existing.id);
                summary.categories_reused += 1;
                continue;
            }

            let parent_id = match &category.parent_slug {
                Some(parent) => self.resolve_category_slug(owner_id, parent, &slugs)?,
                None => None,
            };
            let created = self.create_category(
                owner_id,
                NewCategory {
                    name: category.name.clone(),
                    slug: category.slug.clone(),
                    parent_id,
                    created: category.created_at,
                    ..Default::default()
                },
            )?;
            slugs.insert(created.slug, created.id);
            summary.categories_created += 1;
        }

        let mut initial_id = None;
        for bookmark in &result.bookmarks {
            let Some(url) = &bookmark.url else {
                log::warn!("Skipping bookmark '{}' without URL", bookmark.title);
                summary.bookmarks_skipped += 1;
                continue;
            };

            let category_id = match &bookmark.category_slug {
                Some(slug) => self.resolve_category_slug(owner_id, slug, &slugs)?,
                None => None,
            };
            let category_id = match category_id {
                Some(id) => id,
                None => match initial_id {
                    Some(id) => id,
                    None => {
                        let id = self.ensure_initial_category(owner_id)?.id;
                        initial_id = Some(id);
                        id
                    }
                },
            };

            self.create_bookmark(
                owner_id,
                NewBookmark {
                    url: url.clone(),
                    title: bookmark.title.clone(),
                    description: bookmark.description.clone(),
                    icon: bookmark.icon.clone(),
                    category_id: Some(category_id),
                    created: bookmark.created_at,
                },
            )?;
            summary.bookmarks_created += 1;
        }

        for tag in &result.tags {
            self.get_or_create_tag(owner_id, tag)?;
            summary.tags_ensured += 1;
        }

        tx.commit()?;
        log::info!(
            "Stored import for user {}: {} categories created, {} reused, {} bookmarks created, {} skipped",
            owner_id,
            summary.categories_created,
            summary.categories_reused,
            summary.bookmarks_created,
            summary.bookmarks_skipped
        );
        Ok(summary)
    }
}
