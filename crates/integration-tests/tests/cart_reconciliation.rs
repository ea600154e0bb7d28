//! Guest cart to account cart reconciliation, including the degraded
//! remote-outage path.

#![allow(clippy::unwrap_used)]

use tindahan_core::UserId;
use tindahan_integration_tests::{Harness, line_item};
use tindahan_storefront::cart::{LocalCartStore, RemoteCartMirror, reconcile};

#[tokio::test]
async fn guest_cart_appends_onto_account_cart() {
    let mut h = Harness::new();
    let user = UserId::new("u-1");

    // The account cart already holds 3 of (p-1, M) from another device.
    let mirror = RemoteCartMirror::new(h.ctx.remote_handle());
    mirror
        .put_line(&user, &line_item("p-1", "M", 3, "170"))
        .await
        .unwrap();

    // Guest browses and adds 2 of the same line plus a new one.
    let local = LocalCartStore::new(h.ctx.local_handle());
    local.add(line_item("p-1", "M", 2, "170")).await.unwrap();
    local.add(line_item("p-2", "L", 1, "250")).await.unwrap();

    h.sign_in();
    let outcome = reconcile(&h.ctx).await.unwrap();
    assert!(!outcome.degraded);
    assert_eq!(outcome.merged.len(), 2);

    // Quantities summed, never overwritten.
    let p1 = outcome
        .merged
        .iter()
        .find(|i| i.product_id.as_str() == "p-1")
        .unwrap();
    assert_eq!(p1.quantity, 5);

    // The remote mirror converged to the same snapshot.
    let remote = mirror.snapshot(&user).await.unwrap();
    assert_eq!(remote.len(), 2);
    let remote_p1 = remote
        .iter()
        .find(|i| i.product_id.as_str() == "p-1")
        .unwrap();
    assert_eq!(remote_p1.quantity, 5);

    // The local snapshot was consumed.
    assert!(local.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn same_product_different_size_stays_distinct() {
    let mut h = Harness::new();
    let user = UserId::new("u-1");

    let mirror = RemoteCartMirror::new(h.ctx.remote_handle());
    mirror
        .put_line(&user, &line_item("p-1", "M", 1, "170"))
        .await
        .unwrap();

    let local = LocalCartStore::new(h.ctx.local_handle());
    local.add(line_item("p-1", "L", 1, "170")).await.unwrap();

    h.sign_in();
    let outcome = reconcile(&h.ctx).await.unwrap();
    assert_eq!(outcome.merged.len(), 2);
    assert!(outcome.merged.iter().all(|i| i.quantity == 1));
}

#[tokio::test]
async fn reconcile_is_idempotent_after_clearing() {
    let mut h = Harness::new();
    let user = UserId::new("u-1");

    let local = LocalCartStore::new(h.ctx.local_handle());
    local.add(line_item("p-1", "M", 2, "170")).await.unwrap();

    h.sign_in();
    reconcile(&h.ctx).await.unwrap();

    // Running it again must not double the quantity.
    let outcome = reconcile(&h.ctx).await.unwrap();
    assert_eq!(outcome.merged.len(), 1);
    assert_eq!(outcome.merged[0].quantity, 2);

    let mirror = RemoteCartMirror::new(h.ctx.remote_handle());
    let remote = mirror.snapshot(&user).await.unwrap();
    assert_eq!(remote[0].quantity, 2);
}

#[tokio::test]
async fn outage_degrades_to_read_only_local_view() {
    let mut h = Harness::new();

    let local = LocalCartStore::new(h.ctx.local_handle());
    local.add(line_item("p-1", "M", 2, "170")).await.unwrap();

    h.sign_in();
    h.remote.set_unavailable(true);

    let outcome = reconcile(&h.ctx).await.unwrap();
    assert!(outcome.degraded);
    assert_eq!(outcome.merged.len(), 1);

    // Nothing cleared, so the merge happens for real once the store is back.
    assert_eq!(local.snapshot().await.unwrap().len(), 1);

    h.remote.set_unavailable(false);
    let outcome = reconcile(&h.ctx).await.unwrap();
    assert!(!outcome.degraded);
    assert_eq!(outcome.merged[0].quantity, 2);
    assert!(local.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn guest_session_cannot_reconcile() {
    let h = Harness::new();
    assert!(reconcile(&h.ctx).await.is_err());
}
