//! HTTP surface: serves stored user uploads.

mod files;

use crate::db::StashDb;
use crate::error::Result;
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<StashDb>>,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(db: StashDb, upload_dir: PathBuf) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            upload_dir,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/files/{*path}", get(files::serve_file))
        .route("/files/", get(files::file_not_found))
        .with_state(state)
}

/// Bind `listen_addr` and serve until the process is stopped
pub async fn serve(listen_addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    log::info!(
        "Serving files from {} on http://{}",
        state.upload_dir.display(),
        listener.local_addr()?
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
