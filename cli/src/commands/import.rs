use super::{AppContext, StashCommand};
use owo_colors::OwoColorize;
use stash::error::{Result, StashError};
use stash::import_export::import_netscape_backup;
use std::path::PathBuf;

pub struct ImportCommand {
    pub file: PathBuf,
    pub user: Option<String>,
    pub dry_run: bool,
}

impl StashCommand for ImportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let result = ctx
            .runtime
            .block_on(import_netscape_backup(&self.file, &ctx.config.import))?;

        if result.is_empty() {
            eprintln!(
                "{} No bookmarks or folders found in {}",
                "!".yellow(),
                self.file.display()
            );
            return Ok(());
        }

        if self.dry_run {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        let login = self
            .user
            .as_deref()
            .ok_or_else(|| StashError::InvalidInput("--user is required to store an import".to_string()))?;
        let owner = ctx
            .db
            .find_user_record(login)?
            .ok_or_else(|| StashError::InvalidInput(format!("No user '{}'", login)))?;

        let summary = ctx.db.persist_import(owner.id, &result)?;
        eprintln!(
            "{} Imported {} bookmark(s) and {} new categor(ies) from {}",
            "✓".green(),
            summary.bookmarks_created,
            summary.categories_created,
            self.file.display()
        );
        if summary.bookmarks_skipped > 0 {
            eprintln!(
                "{} Skipped {} bookmark(s) without a URL",
                "!".yellow(),
                summary.bookmarks_skipped
            );
        }
        Ok(())
    }
}
