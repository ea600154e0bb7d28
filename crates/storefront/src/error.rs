//! Unified error handling for the storefront.
//!
//! Remote-call failures are caught where they happen and either substituted
//! with a local fallback or surfaced as one of these variants; none of them
//! may take the page down. Nothing is retried automatically - the only retry
//! is the user re-submitting.

use thiserror::Error;

use tindahan_core::{OrderId, PriceError};

use crate::models::ModelError;
use crate::store::StorageError;

/// A single failed checkout form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// Human-readable message for inline display.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// A unit price failed normalization; checkout is blocked and the user
    /// must restart product selection.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The hosted store could not be reached; callers degrade to cached or
    /// local data and tell the user it may be stale.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(#[source] StorageError),

    /// No order found in any cache or remotely. Terminal for the
    /// confirmation view.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// Required checkout fields are missing or invalid; reported inline,
    /// no partial order is created.
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Checkout was submitted but no handoff exists in either transient
    /// store (expired session, or the stores were cleared).
    #[error("no checkout in progress")]
    HandoffMissing,

    /// An operation that needs an authenticated user ran in a guest session.
    #[error("no authenticated user")]
    NotSignedIn,

    /// A remote document failed schema validation at the read boundary.
    #[error("malformed document: {0}")]
    Malformed(#[from] ModelError),

    /// Local or session storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Format field errors for display.
fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_fields() {
        let err = StorefrontError::Validation(vec![
            FieldError {
                field: "full_name",
                message: "is required".to_owned(),
            },
            FieldError {
                field: "phone",
                message: "is required".to_owned(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: full_name: is required; phone: is required"
        );
    }

    #[test]
    fn test_order_not_found_display() {
        let err = StorefrontError::OrderNotFound(OrderId::new("TDN-1-x"));
        assert_eq!(err.to_string(), "order not found: TDN-1-x");
    }

    #[test]
    fn test_invalid_price_from() {
        let err: StorefrontError = PriceError::Empty.into();
        assert!(matches!(err, StorefrontError::InvalidPrice(_)));
    }
}
