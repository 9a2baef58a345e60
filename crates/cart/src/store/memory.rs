//! In-memory cart store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pet_pantry_core::LineItem;

use super::{CartStore, StoreError};

/// Cart store backed by process memory.
///
/// Used by tests and headless embeddings. Clones share the same backing
/// storage, so a test can keep a handle to inspect what a service
/// persisted. The store round-trips through the same JSON encoding as the
/// file store, so serialization fidelity is exercised either way.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Option<String>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail, simulating an exhausted quota.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Replace the raw stored payload (e.g., with garbage, to exercise
    /// the corrupt-data path).
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
    }

    /// The raw stored payload, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Vec<LineItem> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(raw) = data.as_deref() else {
            return Vec::new();
        };

        match serde_json::from_str(raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart data is not valid JSON, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, items: &[LineItem]) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Write("storage quota exceeded".to_string()));
        }

        let json =
            serde_json::to_string(items).map_err(|e| StoreError::Serialize(e.to_string()))?;
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}
