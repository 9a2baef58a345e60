//! Pet Pantry cart library.
//!
//! A storefront shopping cart: an in-memory ordered collection of line
//! items kept consistent with a key-value persistence adapter and
//! projected into display fragments on every change.
//!
//! # Architecture
//!
//! - [`model`] - Pure cart state: merge, clamp and totals rules
//! - [`service`] - The owned access point wiring state, storage,
//!   notifications and change broadcasts together
//! - [`store`] - Persistence adapters (JSON file, in-memory)
//! - [`notify`] - Transient user-facing notifications with auto-expiry
//! - [`render`] - Askama projections of cart state (badge, item list,
//!   summary, toasts, receipt)
//! - [`checkout`] - Simulated checkout summary (no real transaction)
//!
//! The model and service are fully functional with no rendering target
//! attached; rendering adapters subscribe to change broadcasts instead of
//! being invoked inline from mutation code.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod render;
pub mod service;
pub mod store;
