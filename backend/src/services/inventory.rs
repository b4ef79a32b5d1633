//! Inventory count service: per-show stock snapshots and sold-count upkeep

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{InventoryRecord, MerchItemRef, ShowRef, VariantRef};
use shared::reports::{derive_sold_count, reconcile_sold_count};
use shared::validation::validate_count;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Inventory service for recording counts and listing snapshots
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Input for recording counts of one variant at a show.
/// Omitted fields keep whatever was stored before.
#[derive(Debug, Deserialize)]
pub struct UpsertCountInput {
    pub variant_id: Uuid,
    pub start_count: Option<i32>,
    pub end_count: Option<i32>,
    pub added_count: Option<i32>,
}

/// Flat join row of a record with its show, variant and item
#[derive(Debug, FromRow)]
struct InventoryRow {
    id: Uuid,
    show_id: Uuid,
    variant_id: Uuid,
    start_count: Option<i32>,
    end_count: Option<i32>,
    added_count: i32,
    sold_count: Option<i32>,
    show_name: String,
    show_date: NaiveDate,
    show_venue: String,
    size: String,
    variant_type: Option<String>,
    price: Decimal,
    quantity: i32,
    merch_item_id: Uuid,
    merch_item_name: String,
}

impl From<InventoryRow> for InventoryRecord {
    fn from(r: InventoryRow) -> Self {
        InventoryRecord {
            id: r.id,
            show_id: r.show_id,
            variant_id: r.variant_id,
            start_count: r.start_count,
            end_count: r.end_count,
            added_count: r.added_count,
            sold_count: r.sold_count,
            show: ShowRef {
                id: r.show_id,
                name: r.show_name,
                date: r.show_date,
                venue: r.show_venue,
            },
            variant: VariantRef {
                id: r.variant_id,
                size: r.size,
                variant_type: r.variant_type,
                price: r.price,
                quantity: r.quantity,
                merch_item: MerchItemRef {
                    id: r.merch_item_id,
                    name: r.merch_item_name,
                },
            },
        }
    }
}

const RECORD_SELECT: &str = r#"
    SELECT ir.id, ir.show_id, ir.variant_id,
           ir.start_count, ir.end_count, ir.added_count, ir.sold_count,
           s.name AS show_name, s.date AS show_date, s.venue AS show_venue,
           mv.size, mv.variant_type, mv.price, mv.quantity,
           mi.id AS merch_item_id, mi.name AS merch_item_name
    FROM inventory_records ir
    JOIN shows s ON s.id = ir.show_id
    JOIN merch_variants mv ON mv.id = ir.variant_id
    JOIN merch_items mi ON mi.id = mv.merch_item_id
"#;

/// Counts that will be stored after merging input over the existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedCounts {
    pub start_count: Option<i32>,
    pub end_count: Option<i32>,
    pub added_count: i32,
    pub sold_count: Option<i32>,
}

/// Merge submitted counts over stored ones and back-calculate `sold_count`
pub fn merge_counts(
    input: &UpsertCountInput,
    existing: Option<(Option<i32>, Option<i32>, i32)>,
) -> MergedCounts {
    let (prev_start, prev_end, prev_added) = existing.unwrap_or((None, None, 0));
    let start_count = input.start_count.or(prev_start);
    let end_count = input.end_count.or(prev_end);
    let added_count = input.added_count.unwrap_or(prev_added);

    MergedCounts {
        start_count,
        end_count,
        added_count,
        sold_count: derive_sold_count(start_count, end_count),
    }
}

/// Reconcile every record in place; returns `(record id, sold count)` for
/// each one that now needs writing back
pub fn backfill_sold_counts(records: &mut [InventoryRecord]) -> Vec<(Uuid, i32)> {
    records
        .iter_mut()
        .filter_map(|record| reconcile_sold_count(record).map(|sold| (record.id, sold)))
        .collect()
}

fn validate_input(input: &UpsertCountInput) -> AppResult<()> {
    validate_count("start_count", input.start_count)?;
    validate_count("end_count", input.end_count)?;
    validate_count("added_count", input.added_count)?;
    Ok(())
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record counts for one variant at a show, creating the record if needed
    pub async fn upsert_count(
        &self,
        show_id: Uuid,
        user_id: Uuid,
        input: UpsertCountInput,
    ) -> AppResult<InventoryRecord> {
        validate_input(&input)?;

        let mut tx = self.db.begin().await?;

        let show_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM shows WHERE id = $1)",
        )
        .bind(show_id)
        .fetch_one(&mut *tx)
        .await?;
        if !show_exists {
            return Err(AppError::NotFound("Show".to_string()));
        }

        let variant_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM merch_variants WHERE id = $1)",
        )
        .bind(input.variant_id)
        .fetch_one(&mut *tx)
        .await?;
        if !variant_exists {
            return Err(AppError::NotFound("Variant".to_string()));
        }

        let existing = sqlx::query_as::<_, (Option<i32>, Option<i32>, i32)>(
            r#"
            SELECT start_count, end_count, added_count
            FROM inventory_records
            WHERE show_id = $1 AND variant_id = $2
            FOR UPDATE
            "#,
        )
        .bind(show_id)
        .bind(input.variant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let counts = merge_counts(&input, existing);

        let record_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO inventory_records
                (show_id, variant_id, start_count, end_count, added_count, sold_count, recorded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (show_id, variant_id) DO UPDATE SET
                start_count = EXCLUDED.start_count,
                end_count = EXCLUDED.end_count,
                added_count = EXCLUDED.added_count,
                sold_count = EXCLUDED.sold_count,
                recorded_by = EXCLUDED.recorded_by,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(show_id)
        .bind(input.variant_id)
        .bind(counts.start_count)
        .bind(counts.end_count)
        .bind(counts.added_count)
        .bind(counts.sold_count)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            show_id = %show_id,
            variant_id = %input.variant_id,
            sold = ?counts.sold_count,
            "recorded inventory count"
        );

        self.get_record(record_id).await
    }

    async fn get_record(&self, record_id: Uuid) -> AppResult<InventoryRecord> {
        let sql = format!("{RECORD_SELECT} WHERE ir.id = $1");
        let row = sqlx::query_as::<_, InventoryRow>(&sql)
            .bind(record_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory record".to_string()))?;

        Ok(row.into())
    }

    /// All records of one show, with sold counts backfilled
    pub async fn list_for_show(&self, show_id: Uuid) -> AppResult<Vec<InventoryRecord>> {
        let show_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM shows WHERE id = $1)",
        )
        .bind(show_id)
        .fetch_one(&self.db)
        .await?;
        if !show_exists {
            return Err(AppError::NotFound("Show".to_string()));
        }

        let sql = format!("{RECORD_SELECT} WHERE ir.show_id = $1 ORDER BY mi.name, mv.variant_type NULLS FIRST, mv.size");
        let rows = sqlx::query_as::<_, InventoryRow>(&sql)
            .bind(show_id)
            .fetch_all(&self.db)
            .await?;

        self.reconcile_sold_counts(rows.into_iter().map(InventoryRecord::from).collect())
            .await
    }

    /// All records of every show in a tour, in show date order
    pub async fn list_for_tour(&self, tour_id: Uuid) -> AppResult<Vec<InventoryRecord>> {
        let sql = format!(
            "{RECORD_SELECT} WHERE s.tour_id = $1 \
             ORDER BY s.date, s.created_at, mi.name, mv.variant_type NULLS FIRST, mv.size"
        );
        let rows = sqlx::query_as::<_, InventoryRow>(&sql)
            .bind(tour_id)
            .fetch_all(&self.db)
            .await?;

        self.reconcile_sold_counts(rows.into_iter().map(InventoryRecord::from).collect())
            .await
    }

    /// Backfill missing sold counts and persist each one that changed
    async fn reconcile_sold_counts(
        &self,
        mut records: Vec<InventoryRecord>,
    ) -> AppResult<Vec<InventoryRecord>> {
        let backfilled = backfill_sold_counts(&mut records);

        for &(record_id, sold) in &backfilled {
            sqlx::query(
                "UPDATE inventory_records SET sold_count = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(sold)
            .bind(record_id)
            .execute(&self.db)
            .await?;
        }

        if !backfilled.is_empty() {
            tracing::debug!(updated = backfilled.len(), "backfilled sold counts");
        }

        Ok(records)
    }
}
