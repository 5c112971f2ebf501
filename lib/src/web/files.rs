use super::AppState;
use crate::error::{Result, StashError};
use crate::models::StoredFile;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

const NOT_FOUND_MESSAGE: &str = "File not found";

pub(super) async fn file_not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
}

/// `GET /files/{owner_id}/...`: stream a stored upload back to the client
pub(super) async fn serve_file(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match stream_file(&state, &path).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Failed to serve file '{}': {}", path, e);
            file_not_found().await
        }
    }
}

fn owner_id_from_path(path: &str) -> Result<i64> {
    let segment = path.split('/').next().unwrap_or_default();
    segment
        .parse()
        .map_err(|_| StashError::InvalidInput(format!("Invalid owner id '{}'", segment)))
}

async fn lookup_file(state: &AppState, owner_id: i64, path: &str) -> Result<StoredFile> {
    let db = state.db.clone();
    let relative_path = path.to_string();

    let found = tokio::task::spawn_blocking(move || {
        let db = db
            .lock()
            .map_err(|_| StashError::Other("Database lock poisoned".to_string()))?;
        db.find_file_for_owner(owner_id, &relative_path)
    })
    .await??;

    found.ok_or_else(|| StashError::Other(format!("No file record for '{}'", path)))
}

async fn stream_file(state: &AppState, path: &str) -> Result<Response> {
    let owner_id = owner_id_from_path(path)?;
    let stored = lookup_file(state, owner_id, path).await?;

    let file = tokio::fs::File::open(state.upload_dir.join(&stored.relative_path)).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(mime_type) = &stored.mime_type {
        builder = builder.header(header::CONTENT_TYPE, mime_type);
    }
    builder
        .body(body)
        .map_err(|e| StashError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::super::{router, AppState};
    use crate::db::test_support::{create_test_user, setup_test_db};
    use crate::models::NewFile;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_app() -> (TempDir, AppState) {
        let upload_dir = tempfile::tempdir().unwrap();
        let db = setup_test_db();
        let alice = create_test_user(&db, "alice");
        create_test_user(&db, "bob");

        let alice_dir = upload_dir.path().join(alice.id.to_string());
        fs::create_dir_all(&alice_dir).unwrap();
        fs::write(alice_dir.join("notes.txt"), "hello stash").unwrap();
        fs::write(alice_dir.join("blob"), [1u8, 2, 3]).unwrap();

        db.create_file(
            alice.id,
            NewFile {
                file_name: "notes.txt".to_string(),
                relative_path: format!("{}/notes.txt", alice.id),
                mime_type: Some("text/plain".to_string()),
                size: 11,
            },
        )
        .unwrap();
        db.create_file(
            alice.id,
            NewFile {
                file_name: "blob".to_string(),
                relative_path: format!("{}/blob", alice.id),
                mime_type: None,
                size: 3,
            },
        )
        .unwrap();
        db.create_file(
            alice.id,
            NewFile {
                file_name: "gone.txt".to_string(),
                relative_path: format!("{}/gone.txt", alice.id),
                ..Default::default()
            },
        )
        .unwrap();

        let state = AppState::new(db, upload_dir.path().to_path_buf());
        (upload_dir, state)
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn test_serves_file_with_mime_type() {
        let (_dir, state) = setup_app();

        let (status, content_type, body) = get(state, "/files/1/notes.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(body, b"hello stash");
    }

    #[tokio::test]
    async fn test_serves_file_without_mime_type() {
        let (_dir, state) = setup_app();

        let (status, content_type, body) = get(state, "/files/1/blob").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.is_none());
        assert_eq!(body, vec![1, 2, 3]);
    }

    #[rstest]
    #[case::other_owner("/files/2/notes.txt")]
    #[case::non_numeric_owner("/files/alice/notes.txt")]
    #[case::unknown_path("/files/1/missing.txt")]
    #[case::missing_on_disk("/files/1/gone.txt")]
    #[case::no_path("/files/")]
    #[tokio::test]
    async fn test_not_found(#[case] uri: &str) {
        let (_dir, state) = setup_app();

        let (status, _, body) = get(state, uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"File not found");
    }
}
