use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ArtistId, TourDateId, TourId, UserId, VenueId};

/// A touring artist. Ownership is tracked so that only the owning user may
/// optimize or book on the artist's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub genre: String,
    pub owner: UserId,
}

/// A named tour grouping booked dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub artist_id: ArtistId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub created_by: UserId,
}

/// A booked show: one artist at one venue on one calendar date.
///
/// At most one booking may exist per `(artist_id, date)` — the storage layer
/// enforces this so concurrent reconciliations cannot double-book a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourDate {
    pub id: TourDateId,
    pub artist_id: ArtistId,
    pub tour_id: TourId,
    pub venue_id: VenueId,
    pub date: NaiveDate,
    pub ticket_price: Decimal,
    pub created_by: UserId,
}
