//! Order materialization and submission.
//!
//! Submission is the only place an order comes into existence: the staged
//! handoff, the validated customer form, the chosen payment method, and the
//! totals currently displayed are frozen into one document with a fresh
//! order id and `pending` status.

use chrono::Utc;
use tracing::instrument;

use tindahan_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus};

use crate::context::SessionContext;
use crate::error::{FieldError, Result, StorefrontError};
use crate::models::{CustomerInfo, Order, Totals};
use crate::store::{collections, keys, write_typed};

use super::handoff::{CheckoutHandoff, clear_checkout, consume_checkout};
use super::random_suffix;

/// Generate an order id: time-based token plus random suffix.
///
/// Unique with high probability, not guaranteed; two submissions in the
/// same millisecond would still need a 6-character suffix collision.
#[must_use]
pub fn generate_order_id() -> OrderId {
    OrderId::new(format!(
        "TDN-{}-{}",
        Utc::now().timestamp_millis(),
        random_suffix(6)
    ))
}

/// Validate the checkout form.
///
/// # Errors
///
/// Returns [`StorefrontError::Validation`] listing every missing field, so
/// the form can report them all inline at once.
pub fn validate_customer(customer: &CustomerInfo) -> Result<()> {
    let mut errors = Vec::new();

    let required: [(&'static str, &str); 5] = [
        ("full_name", &customer.full_name),
        ("phone", &customer.phone),
        ("address_line", &customer.address_line),
        ("city", &customer.city),
        ("province", &customer.province),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(FieldError {
                field,
                message: "is required".to_owned(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StorefrontError::Validation(errors))
    }
}

/// Assemble an order entity from a handoff and the displayed totals.
///
/// Pure: nothing is persisted. The totals are taken as given - they are
/// whatever the checkout view displayed at submission time.
#[must_use]
pub fn materialize_order(
    handoff: &CheckoutHandoff,
    customer: CustomerInfo,
    payment_method: PaymentMethod,
    totals: Totals,
) -> Order {
    Order {
        order_id: generate_order_id(),
        user_id: handoff.user.id.clone(),
        line_items: vec![handoff.line_item.clone()],
        customer,
        payment_method,
        payment_status: PaymentStatus::Unpaid,
        totals,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    }
}

/// Submit the staged checkout as an order.
///
/// Steps, in order: consume the handoff, validate the form, materialize,
/// write the order remotely, cache it in the session and per-order local
/// cache for the confirmation view, and finally clear both transient
/// handoff stores. Validation failure creates no partial order; a remote
/// write failure leaves the handoff staged for a manual retry.
///
/// # Errors
///
/// - [`StorefrontError::HandoffMissing`] when nothing is staged
/// - [`StorefrontError::Validation`] for missing form fields
/// - [`StorefrontError::RemoteUnavailable`] when the order write fails
#[instrument(skip_all, fields(user = %ctx.user().id))]
pub async fn submit_order(
    ctx: &SessionContext,
    customer: CustomerInfo,
    payment_method: PaymentMethod,
    displayed_totals: Totals,
) -> Result<Order> {
    let handoff = consume_checkout(ctx)
        .await?
        .ok_or(StorefrontError::HandoffMissing)?;

    validate_customer(&customer)?;

    let order = materialize_order(&handoff, customer, payment_method, displayed_totals);
    let document = order.to_document()?;

    ctx.remote()
        .put(collections::ORDERS, order.order_id.as_str(), document)
        .await
        .map_err(StorefrontError::RemoteUnavailable)?;

    // Confirmation view caches; the remote copy is already authoritative.
    let cache_key = keys::order(&order.order_id);
    write_typed(ctx.session_store(), &cache_key, &order).await?;
    write_typed(ctx.local_store(), &cache_key, &order).await?;

    clear_checkout(ctx).await?;

    Ok(order)
}
