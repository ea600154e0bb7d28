//! Favorites.
//!
//! Signed-in favorites live in the remote `favorites` collection, one
//! document per `(user, product)`. Guests get a local-only list, and a
//! remote outage degrades signed-in users to the same local list rather
//! than losing the tap.

use chrono::Utc;
use serde_json::json;
use tracing::{instrument, warn};

use tindahan_core::{ProductId, UserId};

use crate::context::SessionContext;
use crate::error::Result;
use crate::store::{KeyValueStore, collections, keys, read_typed, write_typed};

fn favorite_document_id(user_id: &UserId, product_id: &ProductId) -> String {
    format!("{user_id}:{product_id}")
}

/// Read the local favorites snapshot.
async fn local_list(store: &dyn KeyValueStore) -> Result<Vec<ProductId>> {
    Ok(read_typed(store, keys::FAVORITES_SNAPSHOT)
        .await?
        .unwrap_or_default())
}

/// Toggle a product in the local snapshot, returning the new state.
async fn local_toggle(store: &dyn KeyValueStore, product_id: &ProductId) -> Result<bool> {
    let mut favorites = local_list(store).await?;
    let now_favorited = if favorites.contains(product_id) {
        favorites.retain(|id| id != product_id);
        false
    } else {
        favorites.push(product_id.clone());
        true
    };
    write_typed(store, keys::FAVORITES_SNAPSHOT, &favorites).await?;
    Ok(now_favorited)
}

/// Toggle a favorite, returning `true` when the product is now favorited.
///
/// Guests toggle the local snapshot only. Signed-in users toggle the
/// remote collection; if the store is unreachable the toggle lands in the
/// local snapshot instead, with a warning.
///
/// # Errors
///
/// Returns a storage error only if the local fallback itself fails.
#[instrument(skip(ctx), fields(product = %product_id))]
pub async fn toggle_favorite(ctx: &SessionContext, product_id: &ProductId) -> Result<bool> {
    let Ok(user) = ctx.require_user() else {
        return local_toggle(ctx.local_store(), product_id).await;
    };

    let id = favorite_document_id(&user.id, product_id);
    let remote = ctx.remote();

    let existing = match remote.get(collections::FAVORITES, &id).await {
        Ok(existing) => existing,
        Err(e) => {
            warn!(error = %e, "favorites unreachable, toggling locally");
            return local_toggle(ctx.local_store(), product_id).await;
        }
    };

    if existing.is_some() {
        match remote.delete(collections::FAVORITES, &id).await {
            Ok(()) => Ok(false),
            Err(e) => {
                warn!(error = %e, "favorite delete failed, toggling locally");
                local_toggle(ctx.local_store(), product_id).await
            }
        }
    } else {
        let doc = json!({
            "userId": user.id.as_str(),
            "productId": product_id.as_str(),
            "createdAt": Utc::now(),
        });
        match remote.put(collections::FAVORITES, &id, doc).await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(error = %e, "favorite write failed, toggling locally");
                local_toggle(ctx.local_store(), product_id).await
            }
        }
    }
}

/// List favorited products.
///
/// Signed-in users read the remote collection, falling back to the local
/// snapshot on failure; guests read the local snapshot directly.
///
/// # Errors
///
/// Returns a storage error only if the local fallback itself fails.
#[instrument(skip(ctx))]
pub async fn list_favorites(ctx: &SessionContext) -> Result<Vec<ProductId>> {
    let Ok(user) = ctx.require_user() else {
        return local_list(ctx.local_store()).await;
    };

    match ctx.remote().list_by_user(collections::FAVORITES, &user.id).await {
        Ok(documents) => Ok(documents
            .iter()
            .filter_map(|doc| doc.get("productId").and_then(serde_json::Value::as_str))
            .map(ProductId::new)
            .collect()),
        Err(e) => {
            warn!(error = %e, "favorites unreachable, listing local snapshot");
            local_list(ctx.local_store()).await
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::store::{MemoryRemote, MemoryStore, RemoteDocuments};
    use std::sync::Arc;
    use tindahan_core::Email;

    fn contexts() -> (SessionContext, Arc<MemoryRemote>) {
        let remote = Arc::new(MemoryRemote::new());
        let ctx = SessionContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::clone(&remote) as Arc<dyn RemoteDocuments>,
        );
        (ctx, remote)
    }

    fn sign_in(ctx: &mut SessionContext) {
        ctx.sign_in(UserProfile::new(
            UserId::new("u-1"),
            Email::parse("maria@example.ph").unwrap(),
        ));
    }

    #[tokio::test]
    async fn test_guest_toggles_locally() {
        let (ctx, remote) = contexts();
        let product = ProductId::new("p-1");

        assert!(toggle_favorite(&ctx, &product).await.unwrap());
        assert_eq!(list_favorites(&ctx).await.unwrap(), vec![product.clone()]);
        assert!(!toggle_favorite(&ctx, &product).await.unwrap());
        assert!(list_favorites(&ctx).await.unwrap().is_empty());

        // Nothing remote for guests.
        let docs = remote
            .list_by_user(collections::FAVORITES, &UserId::new("u-1"))
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_signed_in_toggles_remotely() {
        let (mut ctx, remote) = contexts();
        sign_in(&mut ctx);
        let product = ProductId::new("p-1");

        assert!(toggle_favorite(&ctx, &product).await.unwrap());
        let docs = remote
            .list_by_user(collections::FAVORITES, &UserId::new("u-1"))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);

        assert_eq!(list_favorites(&ctx).await.unwrap(), vec![product.clone()]);

        assert!(!toggle_favorite(&ctx, &product).await.unwrap());
        assert!(list_favorites(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outage_degrades_to_local() {
        let (mut ctx, remote) = contexts();
        sign_in(&mut ctx);
        remote.set_unavailable(true);

        let product = ProductId::new("p-1");
        assert!(toggle_favorite(&ctx, &product).await.unwrap());
        assert_eq!(list_favorites(&ctx).await.unwrap(), vec![product]);
    }
}
