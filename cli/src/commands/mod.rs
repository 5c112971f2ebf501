use stash::config::Config;
use stash::db::StashDb;
use stash::error::Result;
use std::path::Path;
use tokio::runtime::Runtime;

pub struct AppContext<'a> {
    pub db: &'a StashDb,
    pub config: &'a Config,
    pub db_path: &'a Path,
    /// Runtime for the async parts of the library (import, file server)
    pub runtime: &'a Runtime,
}

pub mod import;
pub mod serve;
pub mod users;

pub trait StashCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn StashCommand>)
pub enum CommandEnum {
    Import(import::ImportCommand),
    Serve(serve::ServeCommand),
    InitAdmin(users::InitAdminCommand),
    Users(users::UsersCommand),
    DisableUser(users::DisableUserCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Import(cmd) => cmd.execute(ctx),
            Self::Serve(cmd) => cmd.execute(ctx),
            Self::InitAdmin(cmd) => cmd.execute(ctx),
            Self::Users(cmd) => cmd.execute(ctx),
            Self::DisableUser(cmd) => cmd.execute(ctx),
        }
    }
}
