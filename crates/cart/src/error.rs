//! Unified error handling for cart operations.
//!
//! Cart mutations handle their failures locally (log + notify) so the UI
//! can never crash from a cart operation; only checkout and the render
//! functions return `Result` so embedders can react.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Persistence operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::EmptyCart;
        assert_eq!(err.to_string(), "Cart is empty");

        let err = CartError::Storage(StoreError::Write("disk full".to_string()));
        assert_eq!(err.to_string(), "Storage error: Failed to write cart data: disk full");
    }

    #[test]
    fn test_store_error_converts() {
        fn fails() -> Result<()> {
            Err(StoreError::Write("quota exceeded".to_string()))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(CartError::Storage(_))));
    }
}
