//! Order display resolution and history.
//!
//! The confirmation view runs right after submission, often before the
//! remote write is observable again, so it resolves through a documented
//! chain: session cache, then the per-order local cache, then the remote
//! store scoped to the signed-in user. The remote copy is authoritative
//! once reachable and refreshes the local cache on every hit.

use async_trait::async_trait;
use tracing::{instrument, warn};

use tindahan_core::{OrderId, OrderStatus};

use crate::context::SessionContext;
use crate::error::{Result, StorefrontError};
use crate::models::{Order, OrderView};
use crate::resolve::{FallbackSource, resolve_with_fallback};
use crate::store::{RemoteDocuments, collections, keys, read_typed, write_typed};

/// One step of the order resolution chain.
enum OrderSource<'a> {
    SessionCache {
        ctx: &'a SessionContext,
        order_id: &'a OrderId,
    },
    LocalCache {
        ctx: &'a SessionContext,
        order_id: &'a OrderId,
    },
    Remote {
        ctx: &'a SessionContext,
        order_id: &'a OrderId,
    },
}

#[async_trait]
impl FallbackSource for OrderSource<'_> {
    type Item = Order;

    fn label(&self) -> &'static str {
        match self {
            Self::SessionCache { .. } => "session",
            Self::LocalCache { .. } => "local",
            Self::Remote { .. } => "remote",
        }
    }

    async fn fetch(&self) -> Result<Option<Order>> {
        match self {
            Self::SessionCache { ctx, order_id } => {
                Ok(read_typed(ctx.session_store(), &keys::order(order_id)).await?)
            }
            Self::LocalCache { ctx, order_id } => {
                Ok(read_typed(ctx.local_store(), &keys::order(order_id)).await?)
            }
            Self::Remote { ctx, order_id } => {
                let user = ctx.require_user()?;
                let Some(doc) = ctx
                    .remote()
                    .get(collections::ORDERS, order_id.as_str())
                    .await
                    .map_err(StorefrontError::RemoteUnavailable)?
                else {
                    return Ok(None);
                };
                let order = Order::from_document(doc)?;
                // Orders are only visible to their owner.
                if order.user_id != user.id {
                    return Ok(None);
                }
                Ok(Some(order))
            }
        }
    }
}

/// Resolve an order for the confirmation view.
///
/// Precedence: session cache, per-order local cache, remote store. A
/// remote hit overwrites the local cache; the caches are a
/// performance/offline fallback only.
///
/// # Errors
///
/// Returns [`StorefrontError::OrderNotFound`] when no source has the
/// order. Terminal for the view; the user gets a retry-to-home action.
#[instrument(skip(ctx), fields(order = %order_id))]
pub async fn resolve_order_for_display(
    ctx: &SessionContext,
    order_id: &OrderId,
) -> Result<OrderView> {
    let sources = [
        OrderSource::SessionCache { ctx, order_id },
        OrderSource::LocalCache { ctx, order_id },
        OrderSource::Remote { ctx, order_id },
    ];

    let Some(resolved) = resolve_with_fallback(&sources).await? else {
        return Err(StorefrontError::OrderNotFound(order_id.clone()));
    };

    if resolved.source == "remote" {
        write_typed(ctx.local_store(), &keys::order(order_id), &resolved.value).await?;
    }

    Ok(OrderView {
        order: resolved.value,
        source: resolved.source,
    })
}

/// The signed-in user's orders, newest first.
///
/// Malformed order documents are skipped with a warning; one corrupt
/// record must not blank the whole history page.
///
/// # Errors
///
/// Returns [`StorefrontError::RemoteUnavailable`] if the listing fails;
/// there is no local fallback for history.
#[instrument(skip(ctx), fields(user = %ctx.user().id))]
pub async fn order_history(ctx: &SessionContext) -> Result<Vec<Order>> {
    let user = ctx.require_user()?;
    let documents = ctx
        .remote()
        .list_by_user(collections::ORDERS, &user.id)
        .await
        .map_err(StorefrontError::RemoteUnavailable)?;

    let mut orders = Vec::with_capacity(documents.len());
    for doc in documents {
        match Order::from_document(doc) {
            Ok(order) => orders.push(order),
            Err(e) => warn!(error = %e, "skipping malformed order document"),
        }
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}

/// Admin-side status mutation: the only write an order sees after
/// creation.
///
/// # Errors
///
/// Returns [`StorefrontError::OrderNotFound`] for an unknown order and
/// [`StorefrontError::RemoteUnavailable`] on store failure.
pub async fn set_order_status(
    remote: &dyn RemoteDocuments,
    order_id: &OrderId,
    status: OrderStatus,
) -> Result<Order> {
    let doc = remote
        .get(collections::ORDERS, order_id.as_str())
        .await
        .map_err(StorefrontError::RemoteUnavailable)?
        .ok_or_else(|| StorefrontError::OrderNotFound(order_id.clone()))?;

    let mut order = Order::from_document(doc)?;
    order.status = status;

    remote
        .put(collections::ORDERS, order_id.as_str(), order.to_document()?)
        .await
        .map_err(StorefrontError::RemoteUnavailable)?;

    Ok(order)
}
