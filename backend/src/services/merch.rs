//! Merchandise catalog service: items and their size/type variants

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{MerchItem, MerchItemWithVariants, MerchVariant};
use shared::validation::{validate_count, validate_name, validate_price};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Merch service for managing the catalog
#[derive(Clone)]
pub struct MerchService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct MerchItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MerchItemRow> for MerchItem {
    fn from(r: MerchItemRow) -> Self {
        MerchItem {
            id: r.id,
            name: r.name,
            description: r.description,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct MerchVariantRow {
    id: Uuid,
    merch_item_id: Uuid,
    size: String,
    variant_type: Option<String>,
    price: Decimal,
    quantity: i32,
}

impl From<MerchVariantRow> for MerchVariant {
    fn from(r: MerchVariantRow) -> Self {
        MerchVariant {
            id: r.id,
            merch_item_id: r.merch_item_id,
            size: r.size,
            variant_type: r.variant_type,
            price: r.price,
            quantity: r.quantity,
        }
    }
}

/// Input for creating a merch item, optionally with its variants
#[derive(Debug, Deserialize)]
pub struct CreateMerchItemInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub variants: Vec<CreateVariantInput>,
}

/// Input for updating a merch item
#[derive(Debug, Deserialize)]
pub struct UpdateMerchItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Input for adding a variant
#[derive(Debug, Deserialize)]
pub struct CreateVariantInput {
    pub size: String,
    #[serde(rename = "type")]
    pub variant_type: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i32,
}

/// Input for updating a variant
#[derive(Debug, Deserialize)]
pub struct UpdateVariantInput {
    pub size: Option<String>,
    #[serde(rename = "type")]
    pub variant_type: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

/// Blank variant types are stored as absent
fn normalize_type(variant_type: Option<String>) -> Option<String> {
    variant_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn validate_variant(size: &str, price: Decimal, quantity: i32) -> AppResult<()> {
    validate_name("size", size)?;
    validate_price(price)?;
    validate_count("quantity", Some(quantity))?;
    Ok(())
}

impl MerchService {
    /// Create a new MerchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all merch items with their variants
    pub async fn list_items(&self) -> AppResult<Vec<MerchItemWithVariants>> {
        let items = sqlx::query_as::<_, MerchItemRow>(
            "SELECT id, name, description, created_at FROM merch_items ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        let variants = sqlx::query_as::<_, MerchVariantRow>(
            r#"
            SELECT id, merch_item_id, size, variant_type, price, quantity
            FROM merch_variants
            ORDER BY merch_item_id, variant_type NULLS FIRST, size
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut by_item: HashMap<Uuid, Vec<MerchVariant>> = HashMap::new();
        for v in variants {
            by_item.entry(v.merch_item_id).or_default().push(v.into());
        }

        Ok(items
            .into_iter()
            .map(|item| MerchItemWithVariants {
                variants: by_item.remove(&item.id).unwrap_or_default(),
                item: item.into(),
            })
            .collect())
    }

    /// Get a merch item with its variants
    pub async fn get_item(&self, item_id: Uuid) -> AppResult<MerchItemWithVariants> {
        let item = sqlx::query_as::<_, MerchItemRow>(
            "SELECT id, name, description, created_at FROM merch_items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Merch item".to_string()))?;

        let variants = sqlx::query_as::<_, MerchVariantRow>(
            r#"
            SELECT id, merch_item_id, size, variant_type, price, quantity
            FROM merch_variants
            WHERE merch_item_id = $1
            ORDER BY variant_type NULLS FIRST, size
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.db)
        .await?;

        Ok(MerchItemWithVariants {
            item: item.into(),
            variants: variants.into_iter().map(MerchVariant::from).collect(),
        })
    }

    /// Create a merch item together with any variants supplied
    pub async fn create_item(&self, input: CreateMerchItemInput) -> AppResult<MerchItemWithVariants> {
        validate_name("name", &input.name)?;
        for v in &input.variants {
            validate_variant(&v.size, v.price, v.quantity)?;
        }

        let mut tx = self.db.begin().await?;

        let item = sqlx::query_as::<_, MerchItemRow>(
            r#"
            INSERT INTO merch_items (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await?;

        let mut variants = Vec::with_capacity(input.variants.len());
        for v in input.variants {
            let row = sqlx::query_as::<_, MerchVariantRow>(
                r#"
                INSERT INTO merch_variants (merch_item_id, size, variant_type, price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, merch_item_id, size, variant_type, price, quantity
                "#,
            )
            .bind(item.id)
            .bind(v.size.trim())
            .bind(normalize_type(v.variant_type))
            .bind(v.price)
            .bind(v.quantity)
            .fetch_one(&mut *tx)
            .await?;
            variants.push(MerchVariant::from(row));
        }

        tx.commit().await?;

        tracing::info!(item_id = %item.id, variants = variants.len(), "created merch item");

        Ok(MerchItemWithVariants {
            item: item.into(),
            variants,
        })
    }

    /// Update a merch item's name or description
    pub async fn update_item(
        &self,
        item_id: Uuid,
        input: UpdateMerchItemInput,
    ) -> AppResult<MerchItemWithVariants> {
        let existing = self.get_item(item_id).await?;

        let name = input.name.unwrap_or(existing.item.name);
        let description = input.description.or(existing.item.description);
        validate_name("name", &name)?;

        sqlx::query("UPDATE merch_items SET name = $1, description = $2 WHERE id = $3")
            .bind(name.trim())
            .bind(&description)
            .bind(item_id)
            .execute(&self.db)
            .await?;

        self.get_item(item_id).await
    }

    /// Delete a merch item, its variants and their inventory records
    pub async fn delete_item(&self, item_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM merch_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Merch item".to_string()));
        }

        Ok(())
    }

    /// Add a variant to an existing item
    pub async fn add_variant(&self, item_id: Uuid, input: CreateVariantInput) -> AppResult<MerchVariant> {
        validate_variant(&input.size, input.price, input.quantity)?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM merch_items WHERE id = $1)",
        )
        .bind(item_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Merch item".to_string()));
        }

        let row = sqlx::query_as::<_, MerchVariantRow>(
            r#"
            INSERT INTO merch_variants (merch_item_id, size, variant_type, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, merch_item_id, size, variant_type, price, quantity
            "#,
        )
        .bind(item_id)
        .bind(input.size.trim())
        .bind(normalize_type(input.variant_type))
        .bind(input.price)
        .bind(input.quantity)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a variant. An empty `type` clears it.
    pub async fn update_variant(
        &self,
        variant_id: Uuid,
        input: UpdateVariantInput,
    ) -> AppResult<MerchVariant> {
        let existing = sqlx::query_as::<_, MerchVariantRow>(
            r#"
            SELECT id, merch_item_id, size, variant_type, price, quantity
            FROM merch_variants
            WHERE id = $1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Variant".to_string()))?;

        let size = input.size.unwrap_or(existing.size);
        let variant_type = match input.variant_type {
            Some(t) => normalize_type(Some(t)),
            None => existing.variant_type,
        };
        let price = input.price.unwrap_or(existing.price);
        let quantity = input.quantity.unwrap_or(existing.quantity);

        validate_variant(&size, price, quantity)?;

        let row = sqlx::query_as::<_, MerchVariantRow>(
            r#"
            UPDATE merch_variants
            SET size = $1, variant_type = $2, price = $3, quantity = $4
            WHERE id = $5
            RETURNING id, merch_item_id, size, variant_type, price, quantity
            "#,
        )
        .bind(size.trim())
        .bind(&variant_type)
        .bind(price)
        .bind(quantity)
        .bind(variant_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a variant and its inventory records
    pub async fn delete_variant(&self, variant_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM merch_variants WHERE id = $1")
            .bind(variant_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Variant".to_string()));
        }

        Ok(())
    }
}
