use super::netscape::{parse_netscape_file, SourceNode};
use crate::error::{Result, StashError};
use crate::models::{ImportResult, ImportedBookmark, ImportedCategory};
use crate::slug::create_slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a link that carries no URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingUrlPolicy {
    /// Emit the bookmark with `url: None`
    #[default]
    Keep,
    /// Leave the link out of the result
    Skip,
    /// Fail the whole import
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub missing_url: MissingUrlPolicy,
    /// Deepest nesting level that is still visited; roots are level 0
    pub max_depth: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            missing_url: MissingUrlPolicy::Keep,
            max_depth: 64,
        }
    }
}

/// Flatten a parsed bookmark tree into categories and bookmarks.
///
/// Folders with at least one child become categories, everything else
/// (including empty folders) becomes a bookmark. Nodes are visited depth-first
/// in document order, so a category always appears before any category that
/// names it as parent. No tags are produced from this format.
pub fn translate_netscape_bookmarks(nodes: &[SourceNode], options: &ImportOptions) -> ImportResult {
    let mut result = ImportResult::default();

    // (node, slug of the enclosing category, depth); popped from the back
    let mut pending: Vec<(&SourceNode, Option<String>, usize)> =
        nodes.iter().rev().map(|node| (node, None, 0)).collect();

    while let Some((node, parent_slug, depth)) = pending.pop() {
        match node {
            SourceNode::Folder(folder) if !folder.children.is_empty() => {
                let category = ImportedCategory {
                    name: folder.title.clone(),
                    slug: create_slug(&folder.title),
                    parent_slug,
                    created_at: folder.created_at,
                };

                if depth < options.max_depth {
                    pending.extend(
                        folder
                            .children
                            .iter()
                            .rev()
                            .map(|child| (child, Some(category.slug.clone()), depth + 1)),
                    );
                } else {
                    log::warn!(
                        "Folder '{}' is nested deeper than {} levels; skipping its {} entries",
                        folder.title,
                        options.max_depth,
                        folder.children.len()
                    );
                }

                result.categories.push(category);
            }
            SourceNode::Folder(folder) => {
                push_bookmark(
                    &mut result,
                    options,
                    imported_bookmark(Some(folder.title.as_str()), None, None, None, folder.created_at),
                );
            }
            SourceNode::Link(link) => {
                push_bookmark(
                    &mut result,
                    options,
                    imported_bookmark(
                        link.title.as_deref(),
                        link.url.as_deref(),
                        link.description.as_deref(),
                        link.icon.as_deref(),
                        link.created_at,
                    ),
                );
            }
        }
    }

    result
}

fn imported_bookmark(
    title: Option<&str>,
    url: Option<&str>,
    description: Option<&str>,
    icon: Option<&str>,
    created_at: Option<DateTime<Utc>>,
) -> ImportedBookmark {
    let title = title
        .filter(|t| !t.is_empty())
        .or(url)
        .unwrap_or_default()
        .to_string();

    ImportedBookmark {
        title,
        url: url.map(str::to_string),
        description: description.unwrap_or_default().to_string(),
        category_slug: None,
        created_at,
        icon: icon.map(str::to_string),
    }
}

fn push_bookmark(result: &mut ImportResult, options: &ImportOptions, bookmark: ImportedBookmark) {
    if bookmark.url.is_none() && options.missing_url == MissingUrlPolicy::Skip {
        log::debug!("Skipping bookmark '{}' without URL", bookmark.title);
        return;
    }
    result.bookmarks.push(bookmark);
}

/// Import a Netscape bookmark export file.
///
/// Any read or parse problem is logged and reported as
/// [`StashError::ImportFailed`]; the original error stays available as its
/// source. Nothing is returned on failure.
pub async fn import_netscape_backup(
    path: impl AsRef<Path>,
    options: &ImportOptions,
) -> Result<ImportResult> {
    let path = path.as_ref().to_path_buf();

    let nodes = match read_netscape_backup(path.clone(), options.max_depth).await {
        Ok(nodes) => nodes,
        Err(err) => {
            log::error!("Error importing Netscape backup {:?}: {}", path, err);
            return Err(StashError::ImportFailed(Box::new(err)));
        }
    };

    let result = translate_netscape_bookmarks(&nodes, options);

    if options.missing_url == MissingUrlPolicy::Reject {
        if let Some(bookmark) = result.bookmarks.iter().find(|b| b.url.is_none()) {
            let err = StashError::InvalidInput(format!(
                "bookmark '{}' has no URL",
                bookmark.title
            ));
            log::error!("Error importing Netscape backup {:?}: {}", path, err);
            return Err(StashError::ImportFailed(Box::new(err)));
        }
    }

    log::info!(
        "Translated {} categories and {} bookmarks from {:?}",
        result.categories.len(),
        result.bookmarks.len(),
        path
    );
    Ok(result)
}

async fn read_netscape_backup(path: PathBuf, max_depth: usize) -> Result<Vec<SourceNode>> {
    tokio::task::spawn_blocking(move || parse_netscape_file(&path, max_depth)).await?
}
