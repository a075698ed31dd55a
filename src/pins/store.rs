//! JSON-file persistence for the pin collection.
//!
//! The collection file is the single source of truth: every read loads the
//! whole array and every mutation rewrites it wholesale, pretty-printed so
//! the file stays hand-editable. There is no locking; concurrent writers
//! race and the last one wins (single-user deployment).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Pin;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Repository for the pin collection file
#[derive(Debug, Clone)]
pub struct PinStore {
    path: PathBuf,
}

impl PinStore {
    /// Create a store backed by the given collection file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing collection file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection. A missing file is an empty collection.
    pub async fn load(&self) -> Result<Vec<Pin>, StoreError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&data)?)
    }

    /// Rewrite the full collection, creating the data directory if absent.
    pub async fn save(&self, pins: &[Pin]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(pins)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_pin(id: u64) -> Pin {
        Pin {
            id,
            title: "Granny square blanket".to_string(),
            image: String::new(),
            tags: vec!["crochet".to_string(), "blanket".to_string()],
            pdf: "assets/pdf/blanket.pdf".to_string(),
            used_materials: vec!["yarn".to_string()],
            difficulty: "medium".to_string(),
            creation_date: "2026-08-01".to_string(),
            time: "20h".to_string(),
            production_cost: "35".to_string(),
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = PinStore::new(dir.path().join("pins.json"));

        let pins = vec![sample_pin(1), sample_pin(2)];
        store.save(&pins).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, pins);
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = PinStore::new(dir.path().join("pins.json"));

        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_creates_the_data_directory() {
        let dir = TempDir::new().unwrap();
        let store = PinStore::new(dir.path().join("data").join("pins.json"));

        store.save(&[sample_pin(1)]).await.unwrap();
        assert!(store.path().is_file());
    }

    #[tokio::test]
    async fn collection_file_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let store = PinStore::new(dir.path().join("pins.json"));

        store.save(&[sample_pin(1)]).await.unwrap();

        let text = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(text.contains("\n  "), "expected indented output: {}", text);
    }
}
