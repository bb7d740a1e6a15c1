//! FoodieFinds Core - Shared types library.
//!
//! This crate provides common types used across all FoodieFinds components:
//! - `client` - Session and review/favorite state manager
//! - `cli` - Command-line driver for a live backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, ratings, and passwords

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
