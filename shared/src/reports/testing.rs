//! Record builders for unit tests

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{InventoryRecord, MerchItemRef, ShowRef, VariantRef};
use crate::reports::derive_sold_count;

pub fn variant(item: &str, variant_type: Option<&str>, size: &str, price: i64) -> VariantRef {
    VariantRef {
        id: Uuid::new_v4(),
        size: size.to_string(),
        variant_type: variant_type.map(str::to_string),
        price: Decimal::from(price),
        quantity: 100,
        merch_item: MerchItemRef {
            id: Uuid::new_v4(),
            name: item.to_string(),
        },
    }
}

/// Record for `variant` at a show on June `day`, 2024
pub fn record(
    variant: &VariantRef,
    show: &str,
    day: u32,
    start_count: Option<i32>,
    end_count: Option<i32>,
) -> InventoryRecord {
    let show_id = Uuid::new_v4();
    let sold_count = derive_sold_count(start_count, end_count);
    InventoryRecord {
        id: Uuid::new_v4(),
        show_id,
        variant_id: variant.id,
        start_count,
        end_count,
        added_count: 0,
        sold_count,
        show: ShowRef {
            id: show_id,
            name: show.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            venue: format!("{} Arena", show),
        },
        variant: variant.clone(),
    }
}

pub fn sold(variant: &VariantRef, sold_count: Option<i32>) -> InventoryRecord {
    let mut r = record(variant, "Show", 1, None, None);
    r.sold_count = sold_count;
    r
}
