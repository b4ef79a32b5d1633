//! Merch catalog HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::models::{MerchItemWithVariants, MerchVariant};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{CurrentUser, Manager};
use crate::services::merch::{
    CreateMerchItemInput, CreateVariantInput, UpdateMerchItemInput, UpdateVariantInput,
};
use crate::services::MerchService;
use crate::AppState;

/// List merch items with their variants
pub async fn list_items(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<MerchItemWithVariants>>> {
    let items = MerchService::new(state.db.clone()).list_items().await?;
    Ok(Json(items))
}

/// Create a merch item
pub async fn create_item(
    State(state): State<AppState>,
    _manager: Manager,
    Json(input): Json<CreateMerchItemInput>,
) -> AppResult<(StatusCode, Json<MerchItemWithVariants>)> {
    let item = MerchService::new(state.db.clone()).create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a merch item
pub async fn get_item(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<MerchItemWithVariants>> {
    let item = MerchService::new(state.db.clone()).get_item(item_id).await?;
    Ok(Json(item))
}

/// Update a merch item
pub async fn update_item(
    State(state): State<AppState>,
    _manager: Manager,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateMerchItemInput>,
) -> AppResult<Json<MerchItemWithVariants>> {
    let item = MerchService::new(state.db.clone())
        .update_item(item_id, input)
        .await?;
    Ok(Json(item))
}

/// Delete a merch item
pub async fn delete_item(
    State(state): State<AppState>,
    _manager: Manager,
    Path(item_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    MerchService::new(state.db.clone()).delete_item(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a variant to a merch item
pub async fn add_variant(
    State(state): State<AppState>,
    _manager: Manager,
    Path(item_id): Path<Uuid>,
    Json(input): Json<CreateVariantInput>,
) -> AppResult<(StatusCode, Json<MerchVariant>)> {
    let variant = MerchService::new(state.db.clone())
        .add_variant(item_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(variant)))
}

/// Update a variant
pub async fn update_variant(
    State(state): State<AppState>,
    _manager: Manager,
    Path(variant_id): Path<Uuid>,
    Json(input): Json<UpdateVariantInput>,
) -> AppResult<Json<MerchVariant>> {
    let variant = MerchService::new(state.db.clone())
        .update_variant(variant_id, input)
        .await?;
    Ok(Json(variant))
}

/// Delete a variant
pub async fn delete_variant(
    State(state): State<AppState>,
    _manager: Manager,
    Path(variant_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    MerchService::new(state.db.clone())
        .delete_variant(variant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
