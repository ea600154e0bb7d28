//! Domain models for the storefront.
//!
//! Remote documents are duck-typed JSON. Every model here has exactly one
//! construction path from a raw document, and that path either normalizes
//! the record or rejects it - missing fields never propagate past this
//! boundary.
//!
//! Two parsing modes exist, matching who wrote the document:
//!
//! - *lenient* ([`LineItem::from_document`], [`catalog::Product::from_document`])
//!   for catalog and cart documents, which older pages wrote with prices as
//!   display strings and quantities as strings or nothing at all
//! - *strict* ([`Order::from_document`]) for orders, which only this crate
//!   writes
//!
//! [`catalog::Product::from_document`]: crate::catalog::Product::from_document

pub mod line_item;
pub mod order;
pub mod user;

pub use line_item::{LineItem, LineItemDraft, LineKey};
pub use order::{CustomerInfo, Order, OrderView, Totals};
pub use user::UserProfile;

use thiserror::Error;

use tindahan_core::PriceError;

/// Errors raised when a remote document fails validation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A required field is absent or has the wrong type.
    #[error("missing or invalid field: {field}")]
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A price field failed normalization.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// A strictly-parsed document did not match its schema.
    #[error("document does not match schema: {0}")]
    Schema(#[from] serde_json::Error),
}
