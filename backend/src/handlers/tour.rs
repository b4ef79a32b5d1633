//! Tour and show HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::models::{Show, Tour, TourWithShows};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{CurrentUser, Manager};
use crate::services::tour::{CreateShowInput, CreateTourInput, UpdateShowInput, UpdateTourInput};
use crate::services::TourService;
use crate::AppState;

/// List all tours
pub async fn list_tours(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<Tour>>> {
    let tours = TourService::new(state.db.clone()).list_tours().await?;
    Ok(Json(tours))
}

/// Create a tour
pub async fn create_tour(
    State(state): State<AppState>,
    Manager(user): Manager,
    Json(input): Json<CreateTourInput>,
) -> AppResult<(StatusCode, Json<Tour>)> {
    let tour = TourService::new(state.db.clone())
        .create_tour(user.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(tour)))
}

/// Get a tour with its shows
pub async fn get_tour(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<TourWithShows>> {
    let tour = TourService::new(state.db.clone())
        .get_tour_with_shows(tour_id)
        .await?;
    Ok(Json(tour))
}

/// Update a tour
pub async fn update_tour(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
    Json(input): Json<UpdateTourInput>,
) -> AppResult<Json<Tour>> {
    let tour = TourService::new(state.db.clone())
        .update_tour(tour_id, input)
        .await?;
    Ok(Json(tour))
}

/// Delete a tour
pub async fn delete_tour(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    TourService::new(state.db.clone()).delete_tour(tour_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the shows of a tour
pub async fn list_shows(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<Vec<Show>>> {
    let shows = TourService::new(state.db.clone()).list_shows(tour_id).await?;
    Ok(Json(shows))
}

/// Add a show to a tour
pub async fn create_show(
    State(state): State<AppState>,
    _manager: Manager,
    Path(tour_id): Path<Uuid>,
    Json(input): Json<CreateShowInput>,
) -> AppResult<(StatusCode, Json<Show>)> {
    let show = TourService::new(state.db.clone())
        .create_show(tour_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(show)))
}

/// Get a show
pub async fn get_show(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(show_id): Path<Uuid>,
) -> AppResult<Json<Show>> {
    let show = TourService::new(state.db.clone()).get_show(show_id).await?;
    Ok(Json(show))
}

/// Update a show
pub async fn update_show(
    State(state): State<AppState>,
    _manager: Manager,
    Path(show_id): Path<Uuid>,
    Json(input): Json<UpdateShowInput>,
) -> AppResult<Json<Show>> {
    let show = TourService::new(state.db.clone())
        .update_show(show_id, input)
        .await?;
    Ok(Json(show))
}

/// Delete a show
pub async fn delete_show(
    State(state): State<AppState>,
    _manager: Manager,
    Path(show_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    TourService::new(state.db.clone()).delete_show(show_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
