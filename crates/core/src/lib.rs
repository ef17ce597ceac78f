//! CoffeeCorner Core - Shared types library.
//!
//! This crate provides common types used across all CoffeeCorner components:
//! - `server` - Headless storefront service (catalog, cart, auth, assistant)
//! - `cli` - Command-line tools for user and catalog management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe uids, emails, slugs, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
