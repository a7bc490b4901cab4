//! Repository trait definitions for storage operations.
//!
//! Responsibilities are split across focused traits so implementations stay
//! testable and services can state the narrowest bound they need:
//!
//! - [`CatalogRepository`]: artists and venues (read-only inputs here)
//! - [`DemandRepository`]: fan-demand records
//! - [`BookingRepository`]: tours and booked dates
//! - [`PlanRepository`]: saved plans and optimization-run snapshots
//!
//! For functions that need everything, use the [`TourRepository`] composite
//! bound:
//!
//! ```ignore
//! async fn my_service<R: TourRepository>(repo: &R) -> Result<()> {
//!     let artist = repo.get_artist(artist_id).await?;
//!     let price = repo.latest_ticket_price(artist_id).await?;
//!     Ok(())
//! }
//! ```

pub mod error;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub use error::{RepositoryError, RepositoryResult};

use crate::models::{
    Artist, ArtistId, FanDemand, OptimizationRun, PlanId, RunId, Tour, TourDate, TourId, TourPlan,
    UserId, Venue, VenueId,
};

/// A booking about to be created; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewTourDate {
    pub artist_id: ArtistId,
    pub tour_id: TourId,
    pub venue_id: VenueId,
    pub date: NaiveDate,
    pub ticket_price: Decimal,
    pub created_by: UserId,
}

/// Read access to the artist/venue catalog.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch an artist by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` when the artist doesn't exist
    async fn get_artist(&self, artist_id: ArtistId) -> RepositoryResult<Artist>;

    /// Fetch the venues matching `venue_ids`.
    ///
    /// Unknown ids are simply absent from the result; callers detect them by
    /// comparing cardinalities.
    async fn get_venues(&self, venue_ids: &[VenueId]) -> RepositoryResult<Vec<Venue>>;
}

/// Access to fan-demand records.
#[async_trait]
pub trait DemandRepository: Send + Sync {
    /// All demand records of one artist restricted to a venue set.
    async fn demands_for_venues(
        &self,
        artist_id: ArtistId,
        venue_ids: &[VenueId],
    ) -> RepositoryResult<Vec<FanDemand>>;

    /// The demand record of one (artist, venue) pair, if any.
    async fn demand_for_venue(
        &self,
        artist_id: ArtistId,
        venue_id: VenueId,
    ) -> RepositoryResult<Option<FanDemand>>;
}

/// Access to tours and booked dates.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Fetch a tour by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` when the tour doesn't exist
    async fn get_tour(&self, tour_id: TourId) -> RepositoryResult<Tour>;

    /// The booking of `artist_id` on `date`, if any. At most one can exist.
    async fn find_booking(
        &self,
        artist_id: ArtistId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<TourDate>>;

    /// Create a booking.
    ///
    /// Implementations MUST enforce the `(artist_id, date)` uniqueness
    /// invariant at this level — it is the one cross-request invariant that
    /// has to hold under concurrent reconciliations.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` when the date is already booked
    async fn create_booking(&self, booking: NewTourDate) -> RepositoryResult<TourDate>;

    /// Overwrite an existing booking in place (matched by id).
    async fn update_booking(&self, booking: &TourDate) -> RepositoryResult<()>;

    /// Ticket price of the artist's most recently dated booking, if any.
    /// Used as the fallback price when a venue has no demand record.
    async fn latest_ticket_price(&self, artist_id: ArtistId) -> RepositoryResult<Option<Decimal>>;
}

/// Access to saved plans and their optimization runs.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Fetch a plan by id.
    async fn get_plan(&self, plan_id: PlanId) -> RepositoryResult<TourPlan>;

    /// Persist a pending run snapshot for a plan.
    async fn create_run(
        &self,
        plan_id: PlanId,
        result: serde_json::Value,
        checksum: String,
    ) -> RepositoryResult<OptimizationRun>;

    /// Fetch a run by id.
    async fn get_run(&self, run_id: RunId) -> RepositoryResult<OptimizationRun>;

    /// Transition a run to confirmed after its schedule was applied.
    async fn mark_run_confirmed(&self, run_id: RunId) -> RepositoryResult<()>;
}

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing all four focused
/// traits.
pub trait TourRepository:
    CatalogRepository + DemandRepository + BookingRepository + PlanRepository
{
}

impl<T> TourRepository for T where
    T: CatalogRepository + DemandRepository + BookingRepository + PlanRepository
{
}
