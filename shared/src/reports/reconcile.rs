//! Sold-count back-calculation

use crate::models::InventoryRecord;

/// `start - end` when both counts are known, saturating at the i32 bounds
pub fn derive_sold_count(start_count: Option<i32>, end_count: Option<i32>) -> Option<i32> {
    Some(start_count?.saturating_sub(end_count?))
}

/// Whether a record has been counted out but still lacks a sold count
pub fn needs_reconciliation(record: &InventoryRecord) -> bool {
    record.end_count.is_some() && record.sold_count.is_none()
}

/// Backfill `sold_count` on a counted record.
///
/// Returns the value written, or `None` when the record was left untouched.
/// Running it again on the same record is a no-op.
pub fn reconcile_sold_count(record: &mut InventoryRecord) -> Option<i32> {
    if !needs_reconciliation(record) {
        return None;
    }
    let sold = derive_sold_count(record.start_count, record.end_count)?;
    record.sold_count = Some(sold);
    Some(sold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::{record, variant};

    #[test]
    fn test_derive_sold_count() {
        assert_eq!(derive_sold_count(Some(30), Some(24)), Some(6));
        assert_eq!(derive_sold_count(Some(30), None), None);
        assert_eq!(derive_sold_count(None, Some(4)), None);
        // restocked mid-show without recording it
        assert_eq!(derive_sold_count(Some(5), Some(9)), Some(-4));
    }

    #[test]
    fn test_derive_sold_count_saturates() {
        assert_eq!(derive_sold_count(Some(i32::MAX), Some(-1)), Some(i32::MAX));
        assert_eq!(derive_sold_count(Some(i32::MIN), Some(1)), Some(i32::MIN));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let v = variant("Poster", None, "A2", 15);
        let mut r = record(&v, "Berlin", 3, Some(30), Some(24));
        r.sold_count = None;

        assert_eq!(reconcile_sold_count(&mut r), Some(6));
        assert_eq!(r.sold_count, Some(6));
        assert_eq!(reconcile_sold_count(&mut r), None);
        assert_eq!(r.sold_count, Some(6));
    }

    #[test]
    fn test_reconcile_skips_without_start() {
        let v = variant("Poster", None, "A2", 15);
        let mut r = record(&v, "Berlin", 3, None, Some(24));
        assert!(needs_reconciliation(&r));
        assert_eq!(reconcile_sold_count(&mut r), None);
        assert_eq!(r.sold_count, None);
    }
}
