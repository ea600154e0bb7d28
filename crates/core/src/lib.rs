//! Tindahan Core - Shared types library.
//!
//! This crate provides common types used across all Tindahan components:
//! - `storefront` - Cart, checkout, and order logic over the hosted backend
//! - `integration-tests` - End-to-end flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. Remote documents are duck-typed JSON; every value that crosses a
//! storage boundary is parsed into one of these types first, so malformed
//! records are rejected at the edge instead of propagating missing fields.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
