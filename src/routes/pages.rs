//! Static page and data file serving
//!
//! The frontend is plain files under the configured site root. These routes
//! deliver the listing page and read-only files from the data directory
//! (primarily the pin collection the frontend fetches).

use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the pages router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/data/*path", get(data_file))
}

/// GET /
async fn index(State(state): State<AppState>) -> Result<Response> {
    serve_file(&state.config().paths.root, FsPath::new("index.html")).await
}

/// GET /data/*path
///
/// Read-only delivery of data files, e.g. `/data/pins.json`.
async fn data_file(State(state): State<AppState>, Path(path): Path<String>) -> Result<Response> {
    let relative = sanitize(&path)?;
    serve_file(&state.config().paths.data_path(), &relative).await
}

/// Reject paths that would escape the served directory.
fn sanitize(raw: &str) -> Result<PathBuf> {
    let path = FsPath::new(raw);
    if path.components().all(|c| matches!(c, Component::Normal(_))) {
        Ok(path.to_path_buf())
    } else {
        Err(AppError::NotFound(format!("File '{}' not found", raw)))
    }
}

/// Read a file from disk and serve it with a guessed content type.
pub(crate) async fn serve_file(dir: &FsPath, relative: &FsPath) -> Result<Response> {
    let full = dir.join(relative);

    let bytes = match tokio::fs::read(&full).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "File '{}' not found",
                relative.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let content_type = mime_guess::from_path(&full)
        .first_or_octet_stream()
        .to_string();

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum_test::TestServer;
    use tempfile::TempDir;

    fn test_server(root: &FsPath) -> TestServer {
        let config = Config {
            paths: crate::config::PathsConfig {
                root: root.to_path_buf(),
                ..Config::default().paths
            },
            ..Config::default()
        };
        TestServer::new(router().with_state(AppState::new(config))).unwrap()
    }

    #[test]
    fn sanitize_accepts_plain_relative_paths() {
        assert_eq!(sanitize("pins.json").unwrap(), PathBuf::from("pins.json"));
        assert_eq!(
            sanitize("nested/stash.json").unwrap(),
            PathBuf::from("nested/stash.json")
        );
    }

    #[test]
    fn sanitize_rejects_traversal() {
        assert!(sanitize("../secrets.txt").is_err());
        assert!(sanitize("nested/../../secrets.txt").is_err());
    }

    #[tokio::test]
    async fn serves_data_files_with_content_type() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/pins.json"), b"[]").unwrap();

        let server = test_server(dir.path());
        let response = server.get("/data/pins.json").await;

        response.assert_status_ok();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE.as_str()],
            "application/json"
        );
        response.assert_text("[]");
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let dir = TempDir::new().unwrap();
        let server = test_server(dir.path());

        let response = server.get("/data/pins.json").await;
        response.assert_status_not_found();

        let response = server.get("/").await;
        response.assert_status_not_found();
    }
}
