//! Inventory count handlers

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use shared::models::InventoryRecord;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::reporting::{csv_response, FormatQuery};
use crate::middleware::CurrentUser;
use crate::services::inventory::UpsertCountInput;
use crate::services::{InventoryService, ReportingService, TourService};
use crate::AppState;

/// Record start/added/end counts of a variant at a show
pub async fn upsert_count(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(show_id): Path<Uuid>,
    Json(input): Json<UpsertCountInput>,
) -> AppResult<Json<InventoryRecord>> {
    let record = InventoryService::new(state.db.clone())
        .upsert_count(show_id, user.user_id, input)
        .await?;
    Ok(Json(record))
}

/// Inventory records of one show
pub async fn list_show_inventory(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(show_id): Path<Uuid>,
) -> AppResult<Json<Vec<InventoryRecord>>> {
    let records = InventoryService::new(state.db.clone())
        .list_for_show(show_id)
        .await?;
    Ok(Json(records))
}

/// Inventory records of every show in a tour, as JSON or CSV
pub async fn list_tour_inventory(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(tour_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Response> {
    // 404 for unknown tours rather than an empty list
    TourService::new(state.db.clone()).get_tour(tour_id).await?;

    let records = InventoryService::new(state.db.clone())
        .list_for_tour(tour_id)
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::inventory_csv(&records)?;
        Ok(csv_response("tour_inventory.csv", csv))
    } else {
        Ok(Json(records).into_response())
    }
}
