//! Reporting service for tour analytics and data export
//! Provides shrinkage, tour totals and top-seller reports plus CSV renderings

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{InventoryRecord, TourWithShows};
use shared::reports::{
    build_tour_report, calculate_shrinkage, top_selling_items, tour_stats, ShrinkageItem,
    TopSellingItem, TourReport, TourStats,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;
use crate::services::tour::TourService;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    tours: TourService,
    inventory: InventoryService,
}

/// One row of the shrinkage CSV export
#[derive(Debug, Serialize)]
struct ShrinkageCsvRow<'a> {
    #[serde(rename = "Item")]
    item: &'a str,
    #[serde(rename = "Variant")]
    variant: &'a str,
    #[serde(rename = "Previous Show")]
    prev_show: &'a str,
    #[serde(rename = "Current Show")]
    current_show: &'a str,
    #[serde(rename = "Expected Count")]
    expected: i32,
    #[serde(rename = "Actual Count")]
    actual: i32,
    #[serde(rename = "Lost/Damaged")]
    lost: i32,
    #[serde(rename = "Value Lost")]
    value: Decimal,
}

/// One row of the tour inventory CSV export
#[derive(Debug, Serialize)]
struct InventoryCsvRow<'a> {
    #[serde(rename = "Show")]
    show: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Venue")]
    venue: &'a str,
    #[serde(rename = "Item")]
    item: &'a str,
    #[serde(rename = "Variant")]
    variant: String,
    #[serde(rename = "Price")]
    price: Decimal,
    #[serde(rename = "Start")]
    start: Option<i32>,
    #[serde(rename = "Added")]
    added: i32,
    #[serde(rename = "End")]
    end: Option<i32>,
    #[serde(rename = "Sold")]
    sold: Option<i32>,
    #[serde(rename = "Revenue")]
    revenue: Decimal,
}

/// One variant line of the top-sellers CSV export
#[derive(Debug, Serialize)]
struct TopSellerCsvRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Item")]
    item: &'a str,
    #[serde(rename = "Item Sold")]
    item_sold: i64,
    #[serde(rename = "Item Revenue")]
    item_revenue: Decimal,
    #[serde(rename = "Variant")]
    variant: String,
    #[serde(rename = "Variant Sold")]
    variant_sold: i64,
    #[serde(rename = "Variant Revenue")]
    variant_revenue: Decimal,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            tours: TourService::new(db.clone()),
            inventory: InventoryService::new(db),
        }
    }

    /// Load the tour and a reconciled snapshot of its inventory
    async fn snapshot(&self, tour_id: Uuid) -> AppResult<(TourWithShows, Vec<InventoryRecord>)> {
        let tour = self.tours.get_tour_with_shows(tour_id).await?;
        let records = self.inventory.list_for_tour(tour_id).await?;
        Ok((tour, records))
    }

    /// Stats, shrinkage and top sellers computed over one snapshot
    pub async fn tour_report(&self, tour_id: Uuid) -> AppResult<TourReport> {
        let (tour, records) = self.snapshot(tour_id).await?;
        let report = build_tour_report(&records, Some(&tour));

        tracing::debug!(
            tour_id = %tour_id,
            records = records.len(),
            shrinkage_items = report.shrinkage.len(),
            "built tour report"
        );

        Ok(report)
    }

    /// Shrinkage between consecutive shows of a tour
    pub async fn shrinkage(&self, tour_id: Uuid) -> AppResult<Vec<ShrinkageItem>> {
        let (_, records) = self.snapshot(tour_id).await?;
        Ok(calculate_shrinkage(&records))
    }

    /// Sales and shrinkage totals of a tour
    pub async fn stats(&self, tour_id: Uuid) -> AppResult<TourStats> {
        let (tour, records) = self.snapshot(tour_id).await?;
        let shrinkage = calculate_shrinkage(&records);
        Ok(tour_stats(&records, Some(&tour), &shrinkage))
    }

    /// Best-selling items of a tour
    pub async fn top_sellers(&self, tour_id: Uuid) -> AppResult<Vec<TopSellingItem>> {
        let (_, records) = self.snapshot(tour_id).await?;
        Ok(top_selling_items(&records))
    }

    /// Render shrinkage items as CSV
    pub fn shrinkage_csv(items: &[ShrinkageItem]) -> AppResult<String> {
        let rows: Vec<ShrinkageCsvRow> = items
            .iter()
            .map(|s| ShrinkageCsvRow {
                item: &s.item,
                variant: &s.variant,
                prev_show: &s.prev_show,
                current_show: &s.current_show,
                expected: s.end_count,
                actual: s.start_count,
                lost: s.shrinkage,
                value: s.value,
            })
            .collect();
        Self::export_to_csv(&rows)
    }

    /// Render a tour's inventory records as CSV
    pub fn inventory_csv(records: &[InventoryRecord]) -> AppResult<String> {
        let rows: Vec<InventoryCsvRow> = records
            .iter()
            .map(|r| InventoryCsvRow {
                show: &r.show.name,
                date: r.show.date.format("%Y-%m-%d").to_string(),
                venue: &r.show.venue,
                item: &r.variant.merch_item.name,
                variant: r.variant.label(),
                price: r.variant.price,
                start: r.start_count,
                added: r.added_count,
                end: r.end_count,
                sold: r.sold_count,
                revenue: r.revenue(),
            })
            .collect();
        Self::export_to_csv(&rows)
    }

    /// Render a top-sellers ranking as CSV, one line per variant
    pub fn top_sellers_csv(items: &[TopSellingItem]) -> AppResult<String> {
        let rows: Vec<TopSellerCsvRow> = items
            .iter()
            .enumerate()
            .flat_map(|(i, item)| {
                item.variants.iter().map(move |v| TopSellerCsvRow {
                    rank: i + 1,
                    item: &item.name,
                    item_sold: item.total_sold,
                    item_revenue: item.total_revenue,
                    variant: shared::models::variant_label(v.variant_type.as_deref(), &v.size),
                    variant_sold: v.sold,
                    variant_revenue: v.revenue,
                })
            })
            .collect();
        Self::export_to_csv(&rows)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{MerchItemRef, ShowRef, VariantRef};
    use shared::reports::VariantSales;

    fn record(start: Option<i32>, end: Option<i32>) -> InventoryRecord {
        let show_id = Uuid::new_v4();
        let variant_id = Uuid::new_v4();
        InventoryRecord {
            id: Uuid::new_v4(),
            show_id,
            variant_id,
            start_count: start,
            end_count: end,
            added_count: 2,
            sold_count: shared::reports::derive_sold_count(start, end),
            show: ShowRef {
                id: show_id,
                name: "Leeds".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                venue: "O2 Academy".to_string(),
            },
            variant: VariantRef {
                id: variant_id,
                size: "M".to_string(),
                variant_type: Some("Mens".to_string()),
                price: Decimal::new(2500, 2),
                quantity: 100,
                merch_item: MerchItemRef {
                    id: Uuid::new_v4(),
                    name: "Tour Tee".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_shrinkage_csv_headers() {
        let item = ShrinkageItem {
            variant_id: Uuid::new_v4(),
            prev_show_id: Uuid::new_v4(),
            current_show_id: Uuid::new_v4(),
            item: "Tour Tee".to_string(),
            variant: "Mens M".to_string(),
            prev_show: "Leeds".to_string(),
            current_show: "Glasgow".to_string(),
            end_count: 20,
            start_count: 17,
            shrinkage: 3,
            value: Decimal::new(7500, 2),
        };

        let csv = ReportingService::shrinkage_csv(&[item]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Item,Variant,Previous Show,Current Show,Expected Count,Actual Count,Lost/Damaged,Value Lost")
        );
        assert_eq!(lines.next(), Some("Tour Tee,Mens M,Leeds,Glasgow,20,17,3,75.00"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_inventory_csv_leaves_uncounted_blank() {
        let csv = ReportingService::inventory_csv(&[record(Some(40), None)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Show,Date,Venue,Item,Variant,Price,Start,Added,End,Sold,Revenue")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Leeds,2024-05-03,O2 Academy,Tour Tee,Mens M,25.00,40,2,,,"));
    }

    #[test]
    fn test_inventory_csv_counted_row() {
        let csv = ReportingService::inventory_csv(&[record(Some(40), Some(30))]).unwrap();
        assert!(csv.contains("Leeds,2024-05-03,O2 Academy,Tour Tee,Mens M,25.00,40,2,30,10,250.00"));
    }

    #[test]
    fn test_top_sellers_csv_one_line_per_variant() {
        let item = TopSellingItem {
            merch_item_id: Uuid::new_v4(),
            name: "Tour Tee".to_string(),
            total_sold: 12,
            total_revenue: Decimal::new(30000, 2),
            variants: vec![
                VariantSales {
                    variant_type: Some("Mens".to_string()),
                    size: "M".to_string(),
                    sold: 8,
                    revenue: Decimal::new(20000, 2),
                },
                VariantSales {
                    variant_type: None,
                    size: "L".to_string(),
                    sold: 4,
                    revenue: Decimal::new(10000, 2),
                },
            ],
        };

        let csv = ReportingService::top_sellers_csv(&[item]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,Tour Tee,12,300.00,Mens M,8,200.00");
        assert_eq!(lines[2], "1,Tour Tee,12,300.00,L,4,100.00");
    }

    #[test]
    fn test_empty_export_is_empty() {
        let csv = ReportingService::shrinkage_csv(&[]).unwrap();
        assert!(csv.is_empty());
    }
}
