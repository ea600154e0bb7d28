//! Tindahan Storefront - client-side commerce logic.
//!
//! This crate holds everything between the page and the hosted backend:
//! cart reconciliation, the buy-now checkout handoff, totals, order
//! materialization, and the cache-then-remote resolution used by the order
//! confirmation view. A thin UI layer calls into it; no rendering lives here.
//!
//! # Architecture
//!
//! - The hosted document store is source of truth once a user is signed in -
//!   NO local sync engine, direct document reads and writes
//! - Browser storage (session + local) is modeled by the [`store::KeyValueStore`]
//!   trait; the remote store by [`store::RemoteDocuments`]
//! - Every remote failure degrades to cached or local data at the call site;
//!   nothing here panics on a dead network
//! - All state flows through an explicit [`context::SessionContext`] - no
//!   module-level globals
//!
//! # Example
//!
//! ```rust,ignore
//! use tindahan_storefront::checkout::{begin_checkout, submit_order};
//! use tindahan_storefront::context::SessionContext;
//!
//! let mut ctx = SessionContext::new(session, local, remote);
//! ctx.sign_in(profile);
//!
//! // "Buy now" on a product page
//! begin_checkout(&ctx, draft).await?;
//!
//! // Checkout page submission
//! let order = submit_order(&ctx, customer, method, displayed_totals).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod models;
pub mod orders;
pub mod resolve;
pub mod store;

pub use context::SessionContext;
pub use error::{Result, StorefrontError};
