//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults reproduce the storefront's
//! observed behavior.
//!
//! - `CART_STORAGE_PATH` - Path of the persisted cart file (default: cart.json)
//! - `CART_FREE_DELIVERY_THRESHOLD` - Subtotal at which delivery becomes
//!   free, in minor units (default: 1000)
//! - `CART_DELIVERY_FEE` - Flat delivery fee below the threshold, in minor
//!   units (default: 300)
//! - `CART_NOTIFICATION_TTL_MS` - How long a notification stays on screen
//!   (default: 3000)
//! - `CART_NOTIFICATION_EXIT_MS` - Exit transition grace added to the TTL
//!   (default: 300)

use std::path::PathBuf;

use pet_pantry_core::Price;
use thiserror::Error;

use crate::model::DeliveryPolicy;

const DEFAULT_STORAGE_PATH: &str = "cart.json";
const DEFAULT_FREE_DELIVERY_THRESHOLD: i64 = 1000;
const DEFAULT_DELIVERY_FEE: i64 = 300;
const DEFAULT_NOTIFICATION_TTL_MS: i64 = 3000;
const DEFAULT_NOTIFICATION_EXIT_MS: i64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Path of the persisted cart file
    pub storage_path: PathBuf,
    /// Subtotal at which the delivery fee is waived (inclusive)
    pub free_delivery_threshold: Price,
    /// Flat delivery fee charged below the threshold
    pub delivery_fee: Price,
    /// Notification display time in milliseconds
    pub notification_ttl_ms: i64,
    /// Notification exit transition grace in milliseconds
    pub notification_exit_ms: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            free_delivery_threshold: Price::new(DEFAULT_FREE_DELIVERY_THRESHOLD),
            delivery_fee: Price::new(DEFAULT_DELIVERY_FEE),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            notification_exit_ms: DEFAULT_NOTIFICATION_EXIT_MS,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let free_delivery_threshold = Price::new(get_parsed_env_or(
            "CART_FREE_DELIVERY_THRESHOLD",
            DEFAULT_FREE_DELIVERY_THRESHOLD,
        )?);
        let delivery_fee =
            Price::new(get_parsed_env_or("CART_DELIVERY_FEE", DEFAULT_DELIVERY_FEE)?);
        let notification_ttl_ms =
            get_parsed_env_or("CART_NOTIFICATION_TTL_MS", DEFAULT_NOTIFICATION_TTL_MS)?;
        let notification_exit_ms =
            get_parsed_env_or("CART_NOTIFICATION_EXIT_MS", DEFAULT_NOTIFICATION_EXIT_MS)?;

        Ok(Self {
            storage_path,
            free_delivery_threshold,
            delivery_fee,
            notification_ttl_ms,
            notification_exit_ms,
        })
    }

    /// Delivery fee policy derived from the configured amounts.
    #[must_use]
    pub const fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy {
            free_threshold: self.free_delivery_threshold,
            flat_fee: self.delivery_fee,
        }
    }

    /// Total lifetime of a notification: display time plus exit grace.
    #[must_use]
    pub fn notification_lifetime(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.notification_ttl_ms + self.notification_exit_ms)
    }
}

/// Get an environment variable or a default value.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable parsed as an integer, or a default value.
fn get_parsed_env_or(name: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
