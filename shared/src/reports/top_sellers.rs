//! Best-selling merch items, broken down by variant

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::InventoryRecord;

/// Maximum number of items in a top-sellers ranking
pub const TOP_SELLERS_LIMIT: usize = 8;

/// Sales of one merch item across all of its variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSellingItem {
    pub merch_item_id: Uuid,
    pub name: String,
    pub total_sold: i64,
    pub total_revenue: Decimal,
    /// Sorted by units sold, highest first
    pub variants: Vec<VariantSales>,
}

/// Sales of one variant within a top-selling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSales {
    #[serde(rename = "type")]
    pub variant_type: Option<String>,
    pub size: String,
    pub sold: i64,
    pub revenue: Decimal,
}

/// Variant identity within an item. An absent type is its own key and never
/// equal to any named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct VariantKey {
    variant_type: Option<String>,
    size: String,
}

struct ItemTally {
    item: TopSellingItem,
    variant_index: HashMap<VariantKey, usize>,
}

/// Rank merch items by units sold.
///
/// Only records with a positive sold count take part. Ties keep the order in
/// which items and variants first appear in `records`.
pub fn top_selling_items(records: &[InventoryRecord]) -> Vec<TopSellingItem> {
    let mut tallies: Vec<ItemTally> = Vec::new();
    let mut item_index: HashMap<Uuid, usize> = HashMap::new();

    for record in records {
        let sold = match record.sold_count {
            Some(n) if n > 0 => i64::from(n),
            _ => continue,
        };
        let revenue = Decimal::from(sold) * record.variant.price;
        let merch_item = &record.variant.merch_item;

        let slot = *item_index.entry(merch_item.id).or_insert_with(|| {
            tallies.push(ItemTally {
                item: TopSellingItem {
                    merch_item_id: merch_item.id,
                    name: merch_item.name.clone(),
                    total_sold: 0,
                    total_revenue: Decimal::ZERO,
                    variants: Vec::new(),
                },
                variant_index: HashMap::new(),
            });
            tallies.len() - 1
        });
        let tally = &mut tallies[slot];
        tally.item.total_sold += sold;
        tally.item.total_revenue += revenue;

        let key = VariantKey {
            variant_type: record.variant.variant_type.clone(),
            size: record.variant.size.clone(),
        };
        let variants = &mut tally.item.variants;
        let v = *tally.variant_index.entry(key).or_insert_with(|| {
            variants.push(VariantSales {
                variant_type: record.variant.variant_type.clone(),
                size: record.variant.size.clone(),
                sold: 0,
                revenue: Decimal::ZERO,
            });
            variants.len() - 1
        });
        variants[v].sold += sold;
        variants[v].revenue += revenue;
    }

    let mut items: Vec<TopSellingItem> = tallies
        .into_iter()
        .map(|mut tally| {
            tally.item.variants.sort_by(|a, b| b.sold.cmp(&a.sold));
            tally.item
        })
        .collect();

    items.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));
    items.truncate(TOP_SELLERS_LIMIT);
    items
}
