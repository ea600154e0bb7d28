//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tindahan_core::{Price, ProductId};

use super::ModelError;

/// One line of a cart: a product in a specific size at a resolved price.
///
/// Line items are copied by value across every storage boundary; the copy in
/// local storage, the one in the checkout handoff, and the one in the remote
/// cart collection are independent snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub unit_price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// The identity of a cart line: two line items are the same line iff both
/// product and size match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
}

impl LineItem {
    /// The merge key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity)
    }

    /// Parse a line item from a raw cart document, normalizing the sloppy
    /// shapes older pages wrote.
    ///
    /// - `unitPrice` may be a number or a display string ("₱170.00")
    /// - `quantity` defaults to 1 when absent or non-numeric, floor 1
    /// - `brand`, `size`, and `image` default when absent
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if `productId` or `name` is missing, or if the
    /// price cannot be normalized to a positive amount.
    pub fn from_document(doc: &Value) -> Result<Self, ModelError> {
        let product_id = doc
            .get("productId")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ModelError::MissingField { field: "productId" })?;

        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ModelError::MissingField { field: "name" })?;

        let unit_price = parse_price_field(
            doc.get("unitPrice")
                .ok_or(ModelError::MissingField { field: "unitPrice" })?,
        )?;

        Ok(Self {
            product_id: ProductId::new(product_id),
            name: name.to_owned(),
            brand: string_field(doc, "brand"),
            unit_price,
            quantity: quantity_field(doc),
            size: string_field(doc, "size"),
            image: doc
                .get("image")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }
}

/// A line item as it arrives from a product page, price still unresolved.
///
/// The "buy now" flow builds one of these from whatever the page shows;
/// [`crate::checkout::begin_checkout`] normalizes the price and turns it
/// into a [`LineItem`] or rejects it.
#[derive(Debug, Clone)]
pub struct LineItemDraft {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    /// Display price as shown on the page, e.g. "₱170.00".
    pub unit_price: String,
    pub quantity: Option<u32>,
    pub size: String,
    pub image: Option<String>,
}

impl LineItemDraft {
    /// Normalize the draft into a validated line item.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the display price does not normalize to a
    /// positive amount.
    pub fn resolve(self) -> Result<LineItem, tindahan_core::PriceError> {
        let unit_price = Price::parse(&self.unit_price)?;
        Ok(LineItem {
            product_id: self.product_id,
            name: self.name,
            brand: self.brand,
            unit_price,
            quantity: self.quantity.filter(|q| *q >= 1).unwrap_or(1),
            size: self.size,
            image: self.image,
        })
    }
}

/// Parse a price field that may be a JSON number or a display string.
fn parse_price_field(value: &Value) -> Result<Price, ModelError> {
    match value {
        Value::String(s) => Ok(Price::parse(s)?),
        Value::Number(n) => Ok(Price::parse(&n.to_string())?),
        _ => Err(ModelError::MissingField { field: "unitPrice" }),
    }
}

/// Read a string field, defaulting to empty when absent.
fn string_field(doc: &Value, field: &str) -> String {
    doc.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Read the quantity field; defaults to 1 when absent or non-numeric.
fn quantity_field(doc: &Value) -> u32 {
    let quantity = match doc.get("quantity") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    u32::try_from(quantity.unwrap_or(1)).unwrap_or(1).max(1)
}
