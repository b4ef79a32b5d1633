//! Derived sales and shrinkage reports
//!
//! Every function here is a pure transformation over a snapshot of inventory
//! records. Nothing is cached; callers recompute per request.

mod reconcile;
mod shrinkage;
mod stats;
mod top_sellers;

#[cfg(test)]
mod testing;

pub use reconcile::*;
pub use shrinkage::*;
pub use stats::*;
pub use top_sellers::*;

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, TourWithShows};

/// All derived views of one tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourReport {
    pub stats: TourStats,
    pub shrinkage: Vec<ShrinkageItem>,
    pub top_sellers: Vec<TopSellingItem>,
}

/// Run every calculator over the same snapshot
pub fn build_tour_report(records: &[InventoryRecord], tour: Option<&TourWithShows>) -> TourReport {
    let shrinkage = calculate_shrinkage(records);
    let stats = tour_stats(records, tour, &shrinkage);
    let top_sellers = top_selling_items(records);

    TourReport {
        stats,
        shrinkage,
        top_sellers,
    }
}
