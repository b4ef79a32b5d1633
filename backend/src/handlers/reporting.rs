//! Reporting handlers for tour analytics and data export

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::reports::{TourReport, TourStats};
use shared::types::ExportFormat;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::Manager;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<ExportFormat>,
}

impl FormatQuery {
    pub fn wants_csv(&self) -> bool {
        self.format == Some(ExportFormat::Csv)
    }
}

/// Wrap a CSV body as a file download
pub fn csv_response(filename: &str, body: String) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// Full report of a tour: totals, shrinkage and top sellers
pub async fn get_tour_report(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<TourReport>> {
    let report = ReportingService::new(state.db.clone())
        .tour_report(tour_id)
        .await?;
    Ok(Json(report))
}

/// Shrinkage report of a tour
pub async fn get_shrinkage_report(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Response> {
    let data = ReportingService::new(state.db.clone())
        .shrinkage(tour_id)
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::shrinkage_csv(&data)?;
        Ok(csv_response("shrinkage.csv", csv))
    } else {
        Ok(Json(data).into_response())
    }
}

/// Sales and shrinkage totals of a tour
pub async fn get_stats_report(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<TourStats>> {
    let stats = ReportingService::new(state.db.clone()).stats(tour_id).await?;
    Ok(Json(stats))
}

/// Top-selling items of a tour
pub async fn get_top_sellers_report(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Response> {
    let data = ReportingService::new(state.db.clone())
        .top_sellers(tour_id)
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::top_sellers_csv(&data)?;
        Ok(csv_response("top_sellers.csv", csv))
    } else {
        Ok(Json(data).into_response())
    }
}
