//! Shrinkage: stock lost between consecutive shows for the same variant

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::InventoryRecord;

/// Units lost between two consecutive counted shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShrinkageItem {
    pub variant_id: Uuid,
    pub prev_show_id: Uuid,
    pub current_show_id: Uuid,
    pub item: String,
    pub variant: String,
    pub prev_show: String,
    pub current_show: String,
    /// End count of the previous show (what should have arrived)
    pub end_count: i32,
    /// Start count of the current show (what actually arrived)
    pub start_count: i32,
    pub shrinkage: i32,
    pub value: Decimal,
}

/// Calculate shrinkage across all variants in `records`.
///
/// Records are grouped by variant and ordered by show date (stable, so equal
/// dates keep input order). Each adjacent pair where the previous show's end
/// count exceeds the next show's start count yields one item. Pairs with an
/// uncounted side are skipped, and gains are not reported.
pub fn calculate_shrinkage(records: &[InventoryRecord]) -> Vec<ShrinkageItem> {
    let mut groups: Vec<Vec<&InventoryRecord>> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.variant_id).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    let mut items = Vec::new();
    for mut group in groups {
        group.sort_by_key(|r| r.show.date);

        for pair in group.windows(2) {
            let (prev, current) = (pair[0], pair[1]);
            if let Some(item) = transition_loss(prev, current) {
                items.push(item);
            }
        }
    }
    items
}

fn transition_loss(prev: &InventoryRecord, current: &InventoryRecord) -> Option<ShrinkageItem> {
    let end_count = prev.end_count?;
    let start_count = current.start_count?;

    // widened so malformed counts at the i32 edges cannot overflow
    let delta = i64::from(end_count) - i64::from(start_count);
    if delta <= 0 {
        return None;
    }
    let shrinkage = i32::try_from(delta).unwrap_or(i32::MAX);

    Some(ShrinkageItem {
        variant_id: current.variant_id,
        prev_show_id: prev.show_id,
        current_show_id: current.show_id,
        item: current.variant.merch_item.name.clone(),
        variant: current.variant.label(),
        prev_show: prev.show.name.clone(),
        current_show: current.show.name.clone(),
        end_count,
        start_count,
        shrinkage,
        value: Decimal::from(delta) * current.variant.price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::{record, variant};

    #[test]
    fn test_single_record_yields_nothing() {
        let v = variant("T-Shirt", None, "M", 25);
        let records = vec![record(&v, "London", 1, Some(30), Some(24))];
        assert!(calculate_shrinkage(&records).is_empty());
    }

    #[test]
    fn test_uncounted_end_breaks_pair() {
        let v = variant("T-Shirt", None, "M", 25);
        let records = vec![
            record(&v, "London", 1, Some(30), None),
            record(&v, "Paris", 2, Some(20), Some(10)),
        ];
        assert!(calculate_shrinkage(&records).is_empty());
    }

    #[test]
    fn test_missing_start_breaks_pair() {
        let v = variant("T-Shirt", None, "M", 25);
        let records = vec![
            record(&v, "London", 1, Some(30), Some(24)),
            record(&v, "Paris", 2, None, None),
        ];
        assert!(calculate_shrinkage(&records).is_empty());
    }

    #[test]
    fn test_unordered_input_is_sorted_by_date() {
        let v = variant("Hoodie", Some("Mens"), "L", 60);
        let records = vec![
            record(&v, "Paris", 2, Some(22), Some(17)),
            record(&v, "London", 1, Some(30), Some(24)),
        ];
        let items = calculate_shrinkage(&records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].prev_show, "London");
        assert_eq!(items[0].current_show, "Paris");
        assert_eq!(items[0].variant, "Mens L");
        assert_eq!(items[0].value, Decimal::from(120));
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let v = variant("Poster", None, "A2", 2);
        let records = vec![
            record(&v, "London", 1, Some(0), Some(i32::MAX)),
            record(&v, "Paris", 2, Some(-5), Some(0)),
        ];
        let items = calculate_shrinkage(&records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].shrinkage, i32::MAX);
        assert_eq!(items[0].value, Decimal::from(i64::from(i32::MAX) + 5) * Decimal::from(2));
    }
}
