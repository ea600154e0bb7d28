//! Checkout: buy-now handoff, totals, and order submission.
//!
//! The flow is one-directional: a product page stages a single line item
//! through [`begin_checkout`], the checkout view picks it up with
//! [`consume_checkout`], computes totals, and [`submit_order`] freezes
//! everything into an order document. The handoff lives in two redundant
//! transient stores so a dropped tab session does not lose the purchase.

pub mod handoff;
pub mod materialize;
pub mod totals;

pub use handoff::{CheckoutHandoff, HandoffToken, begin_checkout, clear_checkout, consume_checkout};
pub use materialize::{generate_order_id, materialize_order, submit_order, validate_customer};
pub use totals::compute_totals;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Random lowercase alphanumeric suffix for order ids and handoff tokens.
pub(crate) fn random_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix_shape() {
        let suffix = random_suffix(6);
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
