//! Merchandise catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product (e.g. "T-Shirt")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A size/type combination of a merch item with its own price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchVariant {
    pub id: Uuid,
    pub merch_item_id: Uuid,
    pub size: String,
    #[serde(rename = "type")]
    pub variant_type: Option<String>,
    pub price: Decimal,
    /// Base stock quantity
    pub quantity: i32,
}

impl MerchVariant {
    pub fn label(&self) -> String {
        variant_label(self.variant_type.as_deref(), &self.size)
    }
}

/// Merch item with all of its variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchItemWithVariants {
    #[serde(flatten)]
    pub item: MerchItem,
    pub variants: Vec<MerchVariant>,
}

/// Display label for a variant: "Mens M", or just "M" when untyped
pub fn variant_label(variant_type: Option<&str>, size: &str) -> String {
    match variant_type {
        Some(t) if !t.is_empty() => format!("{} {}", t, size),
        _ => size.to_string(),
    }
}
