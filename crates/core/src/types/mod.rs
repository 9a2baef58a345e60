//! Core types for Pet Pantry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;
pub mod price;

pub use id::*;
pub use item::LineItem;
pub use price::{CurrencyCode, Price};
