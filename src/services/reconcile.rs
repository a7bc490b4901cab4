//! Applying a proposed schedule to booked dates.
//!
//! Schedule items are applied one at a time against the `(artist, date)`
//! booking table. Items landing on a free date create bookings; items
//! colliding with an existing booking are recorded as conflicts and resolved
//! by the caller-chosen strategy. Without a strategy the whole batch aborts
//! AFTER the pass with the full conflict list — creations for earlier
//! non-conflicting items are already committed at that point. Callers
//! needing all-or-nothing semantics must wrap the call in a storage-level
//! transaction.

use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::{NewTourDate, TourRepository};
use crate::models::{Artist, Tour, TourDateId, UserId, VenueId};

use super::error::{PlanningError, ServiceResult};

/// Caller-chosen policy for schedule dates colliding with existing bookings.
///
/// Unrecognized strategy strings deserialize to `Other`: conflicting items
/// are passed over silently (no creation, no error, not recorded as
/// skipped), and unlike an absent strategy the batch does not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Keep the existing booking, record the date as skipped.
    Skip,
    /// Rebook the existing date onto the proposed venue.
    Overwrite,
    /// Anything else the caller sent.
    #[serde(other)]
    Other,
}

/// One proposed stop, as submitted for confirmation. The date arrives as
/// text and is validated here, not at the serialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedDate {
    pub venue_id: VenueId,
    pub date: String,
}

/// A date collision between the proposal and an existing booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub date: NaiveDate,
    /// Id of the existing booking on that date.
    pub existing_tour_id: TourDateId,
    pub existing_venue_id: VenueId,
    pub new_venue_id: VenueId,
}

/// Outcome of a completed reconciliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    pub created_ids: Vec<TourDateId>,
    pub overwritten_ids: Vec<TourDateId>,
    pub skipped_dates: Vec<NaiveDate>,
    pub conflicts: Vec<ScheduleConflict>,
}

/// Applies a proposed schedule to the artist's bookings.
///
/// Per item: the date must parse as an ISO calendar date and lie strictly
/// after `today`, otherwise the whole call fails with a validation error.
/// Free dates become new bookings priced from the venue's fan-demand record,
/// else the artist's most recent booking price, else zero. Collisions are
/// recorded and resolved per [`ConflictStrategy`]; with none supplied, the
/// call ends in [`PlanningError::Conflicts`] after processing every item.
///
/// `today` is the reference date for the future-date rule; callers pass the
/// current calendar date.
pub async fn apply_schedule<R: TourRepository>(
    repo: &R,
    artist: &Artist,
    tour: &Tour,
    schedule: &[ProposedDate],
    conflict_strategy: Option<ConflictStrategy>,
    actor: UserId,
    today: NaiveDate,
) -> ServiceResult<ReconciliationOutcome> {
    let mut outcome = ReconciliationOutcome::default();

    for item in schedule {
        let date = item.date.parse::<NaiveDate>().map_err(|_| {
            PlanningError::Validation(format!("Invalid date format: {}.", item.date))
        })?;
        if date <= today {
            return Err(PlanningError::Validation(format!(
                "Date must be in the future: {}.",
                item.date
            )));
        }

        if let Some(existing) = repo.find_booking(artist.id, date).await? {
            debug!(
                "booking collision for artist {} on {}: existing venue {}, proposed venue {}",
                artist.id, date, existing.venue_id, item.venue_id
            );
            outcome.conflicts.push(ScheduleConflict {
                date,
                existing_tour_id: existing.id,
                existing_venue_id: existing.venue_id,
                new_venue_id: item.venue_id,
            });

            match conflict_strategy {
                Some(ConflictStrategy::Skip) => {
                    outcome.skipped_dates.push(date);
                }
                Some(ConflictStrategy::Overwrite) => {
                    let mut rebooked = existing;
                    rebooked.venue_id = item.venue_id;
                    rebooked.tour_id = tour.id;
                    rebooked.created_by = actor;
                    if let Some(price) = demand_price(repo, artist, item.venue_id).await? {
                        rebooked.ticket_price = price;
                    }
                    repo.update_booking(&rebooked).await?;
                    outcome.overwritten_ids.push(rebooked.id);
                }
                Some(ConflictStrategy::Other) | None => {}
            }
            continue;
        }

        let ticket_price = match demand_price(repo, artist, item.venue_id).await? {
            Some(price) => price,
            None => repo
                .latest_ticket_price(artist.id)
                .await?
                .unwrap_or(Decimal::ZERO),
        };
        let created = repo
            .create_booking(NewTourDate {
                artist_id: artist.id,
                tour_id: tour.id,
                venue_id: item.venue_id,
                date,
                ticket_price,
                created_by: actor,
            })
            .await?;
        outcome.created_ids.push(created.id);
    }

    if !outcome.conflicts.is_empty() && conflict_strategy.is_none() {
        return Err(PlanningError::Conflicts {
            conflicts: outcome.conflicts,
        });
    }

    info!(
        "applied schedule for artist {}: {} created, {} overwritten, {} skipped",
        artist.id,
        outcome.created_ids.len(),
        outcome.overwritten_ids.len(),
        outcome.skipped_dates.len()
    );
    Ok(outcome)
}

async fn demand_price<R: TourRepository>(
    repo: &R,
    artist: &Artist,
    venue_id: VenueId,
) -> ServiceResult<Option<Decimal>> {
    let demand = repo.demand_for_venue(artist.id, venue_id).await?;
    Ok(demand.and_then(|d| d.expected_ticket_price))
}
