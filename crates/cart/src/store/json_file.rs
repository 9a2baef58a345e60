//! File-backed cart store.

use std::io::ErrorKind;
use std::path::PathBuf;

use pet_pantry_core::LineItem;

use super::{CartStore, StoreError};

/// Cart store backed by a single JSON file.
///
/// The file plays the role of the browser's local storage key: one
/// document, read in full on load, overwritten in full on save, with
/// synchronous I/O.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the given path. The file is not touched until
    /// the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path the cart is persisted at.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Vec<LineItem> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read cart file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Stored cart data is not valid JSON, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, items: &[LineItem]) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(items).map_err(|e| StoreError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Write(e.to_string()))
    }
}
