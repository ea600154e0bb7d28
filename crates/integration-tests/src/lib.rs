//! Shared test harness for the integration tests.
//!
//! Every test runs against in-memory stores: two `MemoryStore`s playing
//! session and local storage, and a `MemoryRemote` playing the hosted
//! document store (with an outage switch for the degraded-mode tests).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use serde_json::json;

use tindahan_core::{Email, Price, ProductId, UserId};
use tindahan_storefront::SessionContext;
use tindahan_storefront::models::{LineItem, UserProfile};
use tindahan_storefront::store::{MemoryRemote, MemoryStore, RemoteDocuments, collections};

/// A session context wired to in-memory stores, with handles kept for
/// direct inspection.
pub struct Harness {
    pub ctx: SessionContext,
    pub remote: Arc<MemoryRemote>,
    pub session: Arc<MemoryStore>,
    pub local: Arc<MemoryStore>,
}

impl Harness {
    /// Fresh guest session over empty stores.
    #[must_use]
    pub fn new() -> Self {
        let remote = Arc::new(MemoryRemote::new());
        let session = Arc::new(MemoryStore::new());
        let local = Arc::new(MemoryStore::new());
        let ctx = SessionContext::new(
            Arc::clone(&session) as _,
            Arc::clone(&local) as _,
            Arc::clone(&remote) as _,
        );
        Self {
            ctx,
            remote,
            session,
            local,
        }
    }

    /// Sign the session in as the standard test user `u-1`.
    pub fn sign_in(&mut self) {
        self.ctx.sign_in(test_user());
    }

    /// Seed a product document the way the admin panel writes them:
    /// display-string price included.
    pub async fn seed_product(&self, id: &str, name: &str, display_price: &str) {
        self.remote
            .put(
                collections::PRODUCTS,
                id,
                json!({
                    "name": name,
                    "brand": "Tindahan Basics",
                    "price": display_price,
                    "sizes": ["S", "M", "L"],
                    "image": format!("https://cdn.example.com/{id}.jpg"),
                }),
            )
            .await
            .expect("seeding product");
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard signed-in test identity.
#[must_use]
pub fn test_user() -> UserProfile {
    UserProfile::new(
        UserId::new("u-1"),
        Email::parse("maria@example.ph").expect("valid test email"),
    )
}

/// A validated line item without going through a store.
#[must_use]
pub fn line_item(product: &str, size: &str, quantity: u32, price: &str) -> LineItem {
    LineItem {
        product_id: ProductId::new(product),
        name: format!("Product {product}"),
        brand: "Tindahan Basics".to_owned(),
        unit_price: Price::parse(price).expect("valid test price"),
        quantity,
        size: size.to_owned(),
        image: None,
    }
}
