//! Integration tests for Pet Pantry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pet-pantry-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - End-to-end cart scenarios (add, remove, totals,
//!   checkout, clear)
//! - `persistence` - Storage round-trips, reloads and failure handling
//!
//! The helpers here stand in for the interactive pieces a page would
//! provide: confirmation dialogs answering yes or no.

use pet_pantry_cart::service::ConfirmationGate;

/// Confirmation gate that always approves.
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Confirmation gate that always declines.
pub struct NeverConfirm;

impl ConfirmationGate for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
