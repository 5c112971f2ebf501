use super::{AppContext, StashCommand};
use stash::db::StashDb;
use stash::error::Result;
use stash::web::{self, AppState};
use std::fs;

pub struct ServeCommand {
    pub listen: Option<String>,
}

impl StashCommand for ServeCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let listen_addr = self
            .listen
            .clone()
            .unwrap_or_else(|| ctx.config.listen_addr.clone());
        let upload_dir = ctx.config.upload_dir();
        fs::create_dir_all(&upload_dir)?;

        // The server owns its own connection to the same database file
        let db = StashDb::init(ctx.db_path)?;
        let state = AppState::new(db, upload_dir);

        ctx.runtime.block_on(web::serve(&listen_addr, state))
    }
}
