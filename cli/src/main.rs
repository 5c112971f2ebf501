mod cli;
mod commands;

use clap::Parser;
use commands::AppContext;
use stash::{config, db, error::Result, utils};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger; RUST_LOG still applies unless --debug is given
    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let db_path = if let Some(path) = &args.db {
        path.clone()
    } else {
        utils::get_default_data_dir().join("stash.db")
    };

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = db::StashDb::init(&db_path)?;

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let ctx = AppContext {
        db: &db,
        config: &cfg,
        db_path: &db_path,
        runtime: &runtime,
    };

    args.command.into_command().execute(&ctx)
}
