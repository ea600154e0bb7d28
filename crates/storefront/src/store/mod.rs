//! Storage providers.
//!
//! Three kinds of storage back the storefront, mirroring what the browser
//! gives a page:
//!
//! - a session-scoped transient store (cleared when the tab closes)
//! - a longer-lived local store (survives reloads)
//! - the hosted document database shared by every device
//!
//! The first two are both [`KeyValueStore`]; which role an instance plays is
//! decided by [`crate::context::SessionContext`]. The remote store is
//! [`RemoteDocuments`], implemented by [`rest::RestRemoteStore`] in
//! production and [`memory::MemoryRemote`] in tests.
//!
//! Values are copied across boundaries as independent JSON snapshots; no
//! shared mutable state exists between the three representations.

pub mod memory;
pub mod remote;
pub mod rest;

pub use memory::{MemoryRemote, MemoryStore};
pub use remote::{RemoteDocuments, collections};
pub use rest::RestRemoteStore;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors from storage providers.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request to the hosted store failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A value could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The hosted store answered with a non-success status.
    #[error("backend error ({status}): {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The provider was explicitly marked unavailable (test fakes, offline
    /// mode).
    #[error("store unavailable")]
    Unavailable,
}

/// Async key-value storage, the shape of browser `localStorage` and
/// `sessionStorage`.
///
/// Keys are flat strings; values are JSON. Implementations must be safe to
/// share across tasks.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is not an
    /// error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read a typed value from a key-value store.
///
/// # Errors
///
/// Returns `StorageError::Json` if the stored value does not deserialize.
pub async fn read_typed<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Write a typed value to a key-value store.
///
/// # Errors
///
/// Returns `StorageError::Json` if the value does not serialize.
pub async fn write_typed<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    store.set(key, serde_json::to_value(value)?).await
}

/// Well-known storage keys.
///
/// These match the keys the storefront has always written, so an upgraded
/// client keeps reading carts and handoffs written by an older one.
pub mod keys {
    use tindahan_core::OrderId;

    /// Local persistent cart snapshot (JSON array of line items).
    pub const CART_SNAPSHOT: &str = "cart_snapshot";

    /// Session-scoped checkout handoff.
    pub const CHECKOUT_HANDOFF: &str = "checkout_handoff";

    /// Longer-lived checkout handoff fallback.
    pub const LAST_CHECKOUT: &str = "last_checkout";

    /// Local favorites snapshot for guests and offline mode.
    pub const FAVORITES_SNAPSHOT: &str = "favorites_snapshot";

    /// Per-order local cache key.
    #[must_use]
    pub fn order(order_id: &OrderId) -> String {
        format!("order_{order_id}")
    }
}
