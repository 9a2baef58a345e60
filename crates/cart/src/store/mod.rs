//! Cart persistence adapters.
//!
//! # Persisted layout
//!
//! A single JSON document holding the full collection:
//!
//! ```json
//! [{"id": "dog-food-5kg", "name": "Dog Food", "price": 500,
//!   "image": "https://...", "quantity": 2}]
//! ```
//!
//! Every save overwrites the prior content wholesale. Loading is
//! infallible by contract: missing or unparseable data yields an empty
//! collection so a corrupt store can never take the cart down.

use pet_pantry_core::LineItem;
use thiserror::Error;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Persistence errors surfaced to the cart service.
///
/// These are non-fatal by policy: the service reports them as a warning
/// and keeps operating in memory for the rest of the session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the serialized collection failed (e.g., quota exceeded).
    #[error("Failed to write cart data: {0}")]
    Write(String),

    /// Serializing the collection failed.
    #[error("Failed to serialize cart data: {0}")]
    Serialize(String),
}

/// Key-value persistence for the cart collection.
pub trait CartStore {
    /// Load the last-saved collection.
    ///
    /// Returns an empty collection if no data exists or the stored data
    /// fails to parse; parse failures are logged, never propagated.
    fn load(&self) -> Vec<LineItem>;

    /// Serialize and store the full collection, overwriting prior content.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the write fails. Callers
    /// treat this as a non-fatal warning.
    fn save(&mut self, items: &[LineItem]) -> Result<(), StoreError>;
}
