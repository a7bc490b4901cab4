use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ArtistId, PlanId, RunId, UserId, VenueId};

/// A saved tour plan: the venue pool, regional narrowing, business targets,
/// and optimization constraints an artist's team iterates on before booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourPlan {
    pub id: PlanId,
    pub artist_id: ArtistId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub start_city: String,
    #[serde(default)]
    pub venue_ids: Vec<VenueId>,
    #[serde(default)]
    pub region_filters: RegionFilters,
    #[serde(default)]
    pub targets: PlanTargets,
    #[serde(default)]
    pub constraints: PlanConstraints,
    pub created_by: UserId,
}

/// Optional regional narrowing of a plan's venue pool.
///
/// A venue passes only when it matches every non-empty dimension: city labels
/// by case-insensitive prefix, derived countries by case-insensitive
/// equality. Continent matching is not implemented; requesting continents
/// currently excludes every venue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionFilters {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub continents: Vec<String>,
}

impl RegionFilters {
    /// Returns `true` when no dimension is requested.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.countries.is_empty() && self.continents.is_empty()
    }
}

/// Business targets a plan's optimization result is checked against.
/// Shortfalls produce warnings in the run result, never errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanTargets {
    pub min_revenue: Option<Decimal>,
    pub min_roi: Option<f64>,
    pub min_attendance: Option<f64>,
}

/// Optimization knobs stored with a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConstraints {
    pub start_venue_id: Option<VenueId>,
    #[serde(default = "default_cost_per_km")]
    pub cost_per_km: Decimal,
    #[serde(default = "default_weight")]
    pub distance_weight: f64,
    #[serde(default = "default_weight")]
    pub revenue_weight: f64,
    #[serde(default = "default_min_gap_days")]
    pub min_gap_days: i64,
    pub travel_speed_km_per_day: Option<f64>,
}

fn default_cost_per_km() -> Decimal {
    Decimal::new(200, 2)
}

fn default_weight() -> f64 {
    1.0
}

fn default_min_gap_days() -> i64 {
    1
}

impl Default for PlanConstraints {
    fn default() -> Self {
        Self {
            start_venue_id: None,
            cost_per_km: default_cost_per_km(),
            distance_weight: default_weight(),
            revenue_weight: default_weight(),
            min_gap_days: default_min_gap_days(),
            travel_speed_km_per_day: None,
        }
    }
}

/// Lifecycle of a persisted optimization run.
///
/// Runs are `Pending` when created and become `Confirmed` once their
/// schedule has been applied to bookings. There is no failed terminal state:
/// a failed confirmation leaves the run pending and re-confirmable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Confirmed,
}

/// Immutable snapshot of one plan optimization.
///
/// The result is stored as canonical JSON together with its SHA-256 checksum
/// so a run can be verified untampered before its schedule is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRun {
    pub id: RunId,
    pub plan_id: PlanId,
    pub result: serde_json::Value,
    pub checksum: String,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
}
