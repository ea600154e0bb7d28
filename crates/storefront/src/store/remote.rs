//! Remote document store interface.
//!
//! The hosted backend is a document database: named collections of JSON
//! documents keyed by an opaque identifier. `cart`, `favorites`, and
//! `orders` documents carry a `userId` foreign key; the store enforces no
//! referential integrity and offers no transactions, so multi-step
//! operations (read-then-write) are last-write-wins under concurrency.

use async_trait::async_trait;
use serde_json::Value;

use tindahan_core::UserId;

use super::StorageError;

/// Logical collection names in the hosted store.
pub mod collections {
    /// Product catalog.
    pub const PRODUCTS: &str = "products";
    /// User profiles written by the auth provider.
    pub const USERS: &str = "users";
    /// Per-user cart line documents.
    pub const CART: &str = "cart";
    /// Per-user favorite entries.
    pub const FAVORITES: &str = "favorites";
    /// Submitted orders.
    pub const ORDERS: &str = "orders";
}

/// Document-level access to the hosted store.
///
/// Implemented by [`super::RestRemoteStore`] against the real backend and by
/// [`super::MemoryRemote`] for tests. All operations are non-blocking; a
/// failure is returned, never retried here.
#[async_trait]
pub trait RemoteDocuments: Send + Sync {
    /// Fetch a single document, `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError>;

    /// Create or replace a document.
    async fn put(&self, collection: &str, id: &str, document: Value) -> Result<(), StorageError>;

    /// Delete a document. Deleting an absent document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError>;

    /// List all documents in `collection` whose `userId` field equals
    /// `user_id`.
    async fn list_by_user(
        &self,
        collection: &str,
        user_id: &UserId,
    ) -> Result<Vec<Value>, StorageError>;
}
