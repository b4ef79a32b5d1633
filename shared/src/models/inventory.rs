//! Per-show inventory count models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::variant_label;

/// Stock snapshot of one merch variant around a single show
///
/// At most one record exists per (show, variant) pair. `end_count` is `None`
/// until the show has been counted out; it is never treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: Uuid,
    pub show_id: Uuid,
    pub variant_id: Uuid,
    pub start_count: Option<i32>,
    pub end_count: Option<i32>,
    /// Stock added at this show (restock)
    pub added_count: i32,
    /// `start_count - end_count` once both are known
    pub sold_count: Option<i32>,
    pub show: ShowRef,
    pub variant: VariantRef,
}

/// Show fields embedded in an inventory record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowRef {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub venue: String,
}

/// Variant fields embedded in an inventory record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRef {
    pub id: Uuid,
    pub size: String,
    #[serde(rename = "type")]
    pub variant_type: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub merch_item: MerchItemRef,
}

impl VariantRef {
    pub fn label(&self) -> String {
        variant_label(self.variant_type.as_deref(), &self.size)
    }
}

/// Owning merch item of a variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchItemRef {
    pub id: Uuid,
    pub name: String,
}

impl InventoryRecord {
    /// Units sold, counting a pending record as zero
    pub fn sold_or_zero(&self) -> i32 {
        self.sold_count.unwrap_or(0)
    }

    /// Revenue for this record at the variant's price
    pub fn revenue(&self) -> Decimal {
        Decimal::from(self.sold_or_zero()) * self.variant.price
    }
}
