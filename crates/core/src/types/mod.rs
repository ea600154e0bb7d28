//! Core types for Tindahan.
//!
//! This module provides type-safe wrappers for common domain concepts:
//!
//! - [`id`] - Opaque document identifiers (`UserId`, `ProductId`, `OrderId`)
//! - [`price`] - Peso prices with display-string normalization
//! - [`email`] - Validated email addresses
//! - [`status`] - Order, payment, and fulfillment status enums

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{DocumentId, OrderId, ProductId, UserId};
pub use price::{Price, PriceError};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus};
