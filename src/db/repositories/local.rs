//! In-memory local repository implementation.
//!
//! Stores all data in `HashMap`/`Vec` structures behind a single `RwLock`,
//! giving tests and local development fast, deterministic, isolated storage.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::{
    BookingRepository, CatalogRepository, DemandRepository, NewTourDate, PlanRepository,
    RepositoryError, RepositoryResult,
};
use crate::models::{
    Artist, ArtistId, FanDemand, OptimizationRun, PlanId, RunId, RunStatus, Tour, TourDate,
    TourDateId, TourId, TourPlan, Venue, VenueId,
};

/// In-memory repository over all planning-domain traits.
///
/// Cloning is cheap and clones share the same underlying storage, mirroring
/// how a pooled database handle behaves.
///
/// # Example
/// ```
/// use tourcast::db::repositories::LocalRepository;
/// use tourcast::db::CatalogRepository;
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = LocalRepository::new();
/// // Seed with test data, then drive the services against it.
/// assert!(repo.get_venues(&[]).await.unwrap().is_empty());
/// # }
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    artists: HashMap<ArtistId, Artist>,
    venues: HashMap<VenueId, Venue>,
    demands: Vec<FanDemand>,
    tours: HashMap<TourId, Tour>,
    tour_dates: HashMap<TourDateId, TourDate>,
    plans: HashMap<PlanId, TourPlan>,
    runs: HashMap<RunId, OptimizationRun>,

    next_tour_date_id: i64,
    next_run_id: i64,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an artist. Existing data with the same id is replaced.
    pub fn insert_artist(&self, artist: Artist) {
        self.data.write().unwrap().artists.insert(artist.id, artist);
    }

    /// Seed a venue.
    pub fn insert_venue(&self, venue: Venue) {
        self.data.write().unwrap().venues.insert(venue.id, venue);
    }

    /// Seed a fan-demand record.
    pub fn insert_demand(&self, demand: FanDemand) {
        self.data.write().unwrap().demands.push(demand);
    }

    /// Seed a tour.
    pub fn insert_tour(&self, tour: Tour) {
        self.data.write().unwrap().tours.insert(tour.id, tour);
    }

    /// Seed a plan.
    pub fn insert_plan(&self, plan: TourPlan) {
        self.data.write().unwrap().plans.insert(plan.id, plan);
    }

    /// Number of bookings currently stored.
    pub fn booking_count(&self) -> usize {
        self.data.read().unwrap().tour_dates.len()
    }

    /// Clear all data.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData::default();
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn get_artist(&self, artist_id: ArtistId) -> RepositoryResult<Artist> {
        self.data
            .read()
            .unwrap()
            .artists
            .get(&artist_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("artist {artist_id}")))
    }

    async fn get_venues(&self, venue_ids: &[VenueId]) -> RepositoryResult<Vec<Venue>> {
        let data = self.data.read().unwrap();
        Ok(venue_ids
            .iter()
            .filter_map(|id| data.venues.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl DemandRepository for LocalRepository {
    async fn demands_for_venues(
        &self,
        artist_id: ArtistId,
        venue_ids: &[VenueId],
    ) -> RepositoryResult<Vec<FanDemand>> {
        let data = self.data.read().unwrap();
        Ok(data
            .demands
            .iter()
            .filter(|d| d.artist_id == artist_id && venue_ids.contains(&d.venue_id))
            .cloned()
            .collect())
    }

    async fn demand_for_venue(
        &self,
        artist_id: ArtistId,
        venue_id: VenueId,
    ) -> RepositoryResult<Option<FanDemand>> {
        let data = self.data.read().unwrap();
        Ok(data
            .demands
            .iter()
            .find(|d| d.artist_id == artist_id && d.venue_id == venue_id)
            .cloned())
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn get_tour(&self, tour_id: TourId) -> RepositoryResult<Tour> {
        self.data
            .read()
            .unwrap()
            .tours
            .get(&tour_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("tour {tour_id}")))
    }

    async fn find_booking(
        &self,
        artist_id: ArtistId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<TourDate>> {
        let data = self.data.read().unwrap();
        Ok(data
            .tour_dates
            .values()
            .find(|td| td.artist_id == artist_id && td.date == date)
            .cloned())
    }

    async fn create_booking(&self, booking: NewTourDate) -> RepositoryResult<TourDate> {
        let mut data = self.data.write().unwrap();

        // Uniqueness invariant: one booking per (artist, date). The check and
        // the insert happen under the same write lock.
        let duplicate = data
            .tour_dates
            .values()
            .any(|td| td.artist_id == booking.artist_id && td.date == booking.date);
        if duplicate {
            return Err(RepositoryError::Conflict(format!(
                "artist {} already booked on {}",
                booking.artist_id, booking.date
            )));
        }

        data.next_tour_date_id += 1;
        let tour_date = TourDate {
            id: TourDateId::new(data.next_tour_date_id),
            artist_id: booking.artist_id,
            tour_id: booking.tour_id,
            venue_id: booking.venue_id,
            date: booking.date,
            ticket_price: booking.ticket_price,
            created_by: booking.created_by,
        };
        data.tour_dates.insert(tour_date.id, tour_date.clone());
        Ok(tour_date)
    }

    async fn update_booking(&self, booking: &TourDate) -> RepositoryResult<()> {
        let mut data = self.data.write().unwrap();
        match data.tour_dates.get_mut(&booking.id) {
            Some(existing) => {
                *existing = booking.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!(
                "tour date {}",
                booking.id
            ))),
        }
    }

    async fn latest_ticket_price(&self, artist_id: ArtistId) -> RepositoryResult<Option<Decimal>> {
        let data = self.data.read().unwrap();
        Ok(data
            .tour_dates
            .values()
            .filter(|td| td.artist_id == artist_id)
            .max_by_key(|td| td.date)
            .map(|td| td.ticket_price))
    }
}

#[async_trait]
impl PlanRepository for LocalRepository {
    async fn get_plan(&self, plan_id: PlanId) -> RepositoryResult<TourPlan> {
        self.data
            .read()
            .unwrap()
            .plans
            .get(&plan_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("plan {plan_id}")))
    }

    async fn create_run(
        &self,
        plan_id: PlanId,
        result: serde_json::Value,
        checksum: String,
    ) -> RepositoryResult<OptimizationRun> {
        let mut data = self.data.write().unwrap();
        if !data.plans.contains_key(&plan_id) {
            return Err(RepositoryError::NotFound(format!("plan {plan_id}")));
        }

        data.next_run_id += 1;
        let run = OptimizationRun {
            id: RunId::new(data.next_run_id),
            plan_id,
            result,
            checksum,
            status: RunStatus::Pending,
            created_at: Utc::now(),
        };
        data.runs.insert(run.id, run.clone());
        Ok(run)
    }

    async fn get_run(&self, run_id: RunId) -> RepositoryResult<OptimizationRun> {
        self.data
            .read()
            .unwrap()
            .runs
            .get(&run_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("run {run_id}")))
    }

    async fn mark_run_confirmed(&self, run_id: RunId) -> RepositoryResult<()> {
        let mut data = self.data.write().unwrap();
        match data.runs.get_mut(&run_id) {
            Some(run) => {
                run.status = RunStatus::Confirmed;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("run {run_id}"))),
        }
    }
}
