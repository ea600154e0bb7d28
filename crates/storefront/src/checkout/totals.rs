//! Order totals.
//!
//! Shipping is a flat ₱150 regardless of item count; cash-on-delivery adds
//! a flat ₱50 service fee; nothing else contributes. All math is decimal,
//! rounded to two places.

use rust_decimal::Decimal;

use tindahan_core::PaymentMethod;

use crate::models::{LineItem, Totals};

/// Flat-rate shipping in pesos.
fn shipping_flat() -> Decimal {
    Decimal::new(150, 0)
}

/// Cash-on-delivery service surcharge in pesos.
fn cod_service_fee() -> Decimal {
    Decimal::new(50, 0)
}

fn service_fee_for(method: PaymentMethod) -> Decimal {
    match method {
        PaymentMethod::CashOnDelivery => cod_service_fee(),
        PaymentMethod::Gcash | PaymentMethod::Card => Decimal::ZERO,
    }
}

/// Compute a totals breakdown from line items and payment method.
#[must_use]
pub fn compute_totals(line_items: &[LineItem], method: PaymentMethod) -> Totals {
    let subtotal: Decimal = line_items
        .iter()
        .map(LineItem::line_total)
        .sum::<Decimal>()
        .round_dp(2);
    let shipping = shipping_flat();
    let service_fee = service_fee_for(method);

    Totals {
        subtotal,
        shipping,
        service_fee,
        total: (subtotal + shipping + service_fee).round_dp(2),
    }
}

impl Totals {
    /// Recompute the fee and total for a different payment method, keeping
    /// the subtotal and shipping currently displayed.
    ///
    /// Does not go back to the line items: the displayed totals are what
    /// gets frozen into the order at submission time, so a display that has
    /// drifted from the underlying items carries its drift into the
    /// persisted order. Known risk; the fix belongs server-side.
    #[must_use]
    pub fn with_payment_method(self, method: PaymentMethod) -> Self {
        let service_fee = service_fee_for(method);
        Self {
            subtotal: self.subtotal,
            shipping: self.shipping,
            service_fee,
            total: (self.subtotal + self.shipping + service_fee).round_dp(2),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tindahan_core::{Price, ProductId};

    fn item(price: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new("p-1"),
            name: "Plain Tee".to_owned(),
            brand: String::new(),
            unit_price: Price::parse(price).unwrap(),
            quantity,
            size: "M".to_owned(),
            image: None,
        }
    }

    #[test]
    fn test_cod_scenario() {
        // price 170, quantity 2, COD: 340 + 150 + 50 = 540.
        let totals = compute_totals(&[item("170", 2)], PaymentMethod::CashOnDelivery);
        assert_eq!(totals.subtotal, Decimal::new(340, 0));
        assert_eq!(totals.shipping, Decimal::new(150, 0));
        assert_eq!(totals.service_fee, Decimal::new(50, 0));
        assert_eq!(totals.total, Decimal::new(540, 0));
    }

    #[test]
    fn test_cod_fee_is_gcash_fee_plus_fifty() {
        let items = [item("170", 2), item("1,250.50", 1)];
        let cod = compute_totals(&items, PaymentMethod::CashOnDelivery);
        let gcash = compute_totals(&items, PaymentMethod::Gcash);
        assert_eq!(cod.service_fee, gcash.service_fee + Decimal::new(50, 0));
        assert_eq!(cod.subtotal, gcash.subtotal);
    }

    #[test]
    fn test_empty_cart_totals() {
        let gcash = compute_totals(&[], PaymentMethod::Gcash);
        assert_eq!(gcash.subtotal, Decimal::ZERO);
        assert_eq!(gcash.total, gcash.shipping);

        let cod = compute_totals(&[], PaymentMethod::CashOnDelivery);
        assert_eq!(cod.total, cod.shipping + cod.service_fee);
    }

    #[test]
    fn test_shipping_is_flat_regardless_of_count() {
        let one = compute_totals(&[item("170", 1)], PaymentMethod::Gcash);
        let many = compute_totals(
            &[item("170", 5), item("999.99", 3)],
            PaymentMethod::Gcash,
        );
        assert_eq!(one.shipping, many.shipping);
    }

    #[test]
    fn test_payment_method_change_reuses_displayed_subtotal() {
        // The displayed subtotal is authoritative even if it has drifted
        // from the line items; switching methods must not re-derive it.
        let displayed = Totals {
            subtotal: Decimal::new(999, 0), // drifted
            shipping: Decimal::new(150, 0),
            service_fee: Decimal::ZERO,
            total: Decimal::new(1149, 0),
        };
        let switched = displayed.with_payment_method(PaymentMethod::CashOnDelivery);
        assert_eq!(switched.subtotal, Decimal::new(999, 0));
        assert_eq!(switched.service_fee, Decimal::new(50, 0));
        assert_eq!(switched.total, Decimal::new(1199, 0));
    }
}
