//! Tour and show management service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use shared::models::{Show, Tour, TourWithShows};
use shared::types::DateRange;
use shared::validation::{validate_date_range, validate_name};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Tour service for managing tours and their shows
#[derive(Clone)]
pub struct TourService {
    db: PgPool,
}

/// Row for tour queries
#[derive(Debug, FromRow)]
struct TourRow {
    id: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TourRow> for Tour {
    fn from(r: TourRow) -> Self {
        Tour {
            id: r.id,
            name: r.name,
            start_date: r.start_date,
            end_date: r.end_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Row for show queries
#[derive(Debug, FromRow)]
struct ShowRow {
    id: Uuid,
    tour_id: Uuid,
    name: String,
    venue: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<ShowRow> for Show {
    fn from(r: ShowRow) -> Self {
        Show {
            id: r.id,
            tour_id: r.tour_id,
            name: r.name,
            venue: r.venue,
            date: r.date,
            created_at: r.created_at,
        }
    }
}

/// Input for creating a tour
#[derive(Debug, Deserialize)]
pub struct CreateTourInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Input for updating a tour
#[derive(Debug, Deserialize)]
pub struct UpdateTourInput {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Input for creating a show
#[derive(Debug, Deserialize)]
pub struct CreateShowInput {
    pub name: String,
    pub venue: String,
    pub date: NaiveDate,
}

/// Input for updating a show
#[derive(Debug, Deserialize)]
pub struct UpdateShowInput {
    pub name: Option<String>,
    pub venue: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TourService {
    /// Create a new TourService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all tours, most recent first
    pub async fn list_tours(&self) -> AppResult<Vec<Tour>> {
        let rows = sqlx::query_as::<_, TourRow>(
            r#"
            SELECT id, name, start_date, end_date, created_at, updated_at
            FROM tours
            ORDER BY start_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Tour::from).collect())
    }

    /// Create a tour
    pub async fn create_tour(&self, user_id: Uuid, input: CreateTourInput) -> AppResult<Tour> {
        validate_name("name", &input.name)?;
        validate_date_range(&DateRange {
            start: input.start_date,
            end: input.end_date,
        })?;

        let row = sqlx::query_as::<_, TourRow>(
            r#"
            INSERT INTO tours (name, start_date, end_date, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(tour_id = %row.id, "created tour");
        Ok(row.into())
    }

    /// Get a tour without its shows
    pub async fn get_tour(&self, tour_id: Uuid) -> AppResult<Tour> {
        let row = sqlx::query_as::<_, TourRow>(
            r#"
            SELECT id, name, start_date, end_date, created_at, updated_at
            FROM tours
            WHERE id = $1
            "#,
        )
        .bind(tour_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour".to_string()))?;

        Ok(row.into())
    }

    /// Look up a tour with its shows; `None` when the tour does not exist
    pub async fn find_tour_with_shows(&self, tour_id: Uuid) -> AppResult<Option<TourWithShows>> {
        let tour = match self.get_tour(tour_id).await {
            Ok(tour) => tour,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let shows = self.list_shows_unchecked(tour_id).await?;
        Ok(Some(TourWithShows { tour, shows }))
    }

    /// Get a tour with its shows
    pub async fn get_tour_with_shows(&self, tour_id: Uuid) -> AppResult<TourWithShows> {
        self.find_tour_with_shows(tour_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tour".to_string()))
    }

    /// Update a tour
    pub async fn update_tour(&self, tour_id: Uuid, input: UpdateTourInput) -> AppResult<Tour> {
        let existing = self.get_tour(tour_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let start_date = input.start_date.unwrap_or(existing.start_date);
        let end_date = input.end_date.unwrap_or(existing.end_date);

        validate_name("name", &name)?;
        validate_date_range(&DateRange {
            start: start_date,
            end: end_date,
        })?;

        let row = sqlx::query_as::<_, TourRow>(
            r#"
            UPDATE tours
            SET name = $1, start_date = $2, end_date = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(name.trim())
        .bind(start_date)
        .bind(end_date)
        .bind(tour_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a tour. Shows and their inventory records go with it.
    pub async fn delete_tour(&self, tour_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(tour_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tour".to_string()));
        }

        tracing::info!(tour_id = %tour_id, "deleted tour");
        Ok(())
    }

    /// List shows of a tour in date order
    pub async fn list_shows(&self, tour_id: Uuid) -> AppResult<Vec<Show>> {
        self.get_tour(tour_id).await?;
        self.list_shows_unchecked(tour_id).await
    }

    async fn list_shows_unchecked(&self, tour_id: Uuid) -> AppResult<Vec<Show>> {
        let rows = sqlx::query_as::<_, ShowRow>(
            r#"
            SELECT id, tour_id, name, venue, date, created_at
            FROM shows
            WHERE tour_id = $1
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(tour_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Show::from).collect())
    }

    /// Add a show to a tour
    pub async fn create_show(&self, tour_id: Uuid, input: CreateShowInput) -> AppResult<Show> {
        validate_name("name", &input.name)?;
        validate_name("venue", &input.venue)?;
        self.get_tour(tour_id).await?;

        let row = sqlx::query_as::<_, ShowRow>(
            r#"
            INSERT INTO shows (tour_id, name, venue, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tour_id, name, venue, date, created_at
            "#,
        )
        .bind(tour_id)
        .bind(input.name.trim())
        .bind(input.venue.trim())
        .bind(input.date)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(tour_id = %tour_id, show_id = %row.id, "created show");
        Ok(row.into())
    }

    /// Get a single show
    pub async fn get_show(&self, show_id: Uuid) -> AppResult<Show> {
        let row = sqlx::query_as::<_, ShowRow>(
            r#"
            SELECT id, tour_id, name, venue, date, created_at
            FROM shows
            WHERE id = $1
            "#,
        )
        .bind(show_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Show".to_string()))?;

        Ok(row.into())
    }

    /// Update a show
    pub async fn update_show(&self, show_id: Uuid, input: UpdateShowInput) -> AppResult<Show> {
        let existing = self.get_show(show_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let venue = input.venue.unwrap_or(existing.venue);
        let date = input.date.unwrap_or(existing.date);

        validate_name("name", &name)?;
        validate_name("venue", &venue)?;

        let row = sqlx::query_as::<_, ShowRow>(
            r#"
            UPDATE shows
            SET name = $1, venue = $2, date = $3
            WHERE id = $4
            RETURNING id, tour_id, name, venue, date, created_at
            "#,
        )
        .bind(name.trim())
        .bind(venue.trim())
        .bind(date)
        .bind(show_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a show and its inventory records
    pub async fn delete_show(&self, show_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(show_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Show".to_string()));
        }

        Ok(())
    }
}
