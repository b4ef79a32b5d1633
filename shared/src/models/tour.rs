//! Tour and show models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A managed series of shows with a date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single date/venue event belonging to a tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub name: String,
    pub venue: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Tour together with its shows, ordered by date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourWithShows {
    #[serde(flatten)]
    pub tour: Tour,
    pub shows: Vec<Show>,
}

impl TourWithShows {
    pub fn show_count(&self) -> usize {
        self.shows.len()
    }
}
