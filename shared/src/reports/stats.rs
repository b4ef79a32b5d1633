//! Tour summary totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShrinkageItem;
use crate::models::{InventoryRecord, TourWithShows};

/// Sales and shrinkage totals for one tour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourStats {
    pub total_sold: i64,
    pub total_revenue: Decimal,
    pub total_shrinkage: i64,
    pub total_shrinkage_value: Decimal,
    /// Revenue per show; zero when the tour has no shows
    pub avg_per_show: Decimal,
}

/// Fold records and shrinkage into tour totals.
///
/// A missing tour is treated as having no shows.
pub fn tour_stats(
    records: &[InventoryRecord],
    tour: Option<&TourWithShows>,
    shrinkage: &[ShrinkageItem],
) -> TourStats {
    let total_sold = records.iter().map(|r| i64::from(r.sold_or_zero())).sum();
    let total_revenue: Decimal = records.iter().map(InventoryRecord::revenue).sum();

    let total_shrinkage = shrinkage.iter().map(|s| i64::from(s.shrinkage)).sum();
    let total_shrinkage_value = shrinkage.iter().map(|s| s.value).sum();

    let show_count = tour.map_or(0, TourWithShows::show_count);
    let avg_per_show = if show_count == 0 {
        Decimal::ZERO
    } else {
        total_revenue / Decimal::from(show_count)
    };

    TourStats {
        total_sold,
        total_revenue,
        total_shrinkage,
        total_shrinkage_value,
        avg_per_show,
    }
}
