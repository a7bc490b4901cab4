//! Tour optimization orchestration.
//!
//! Two entry flows share one computation core:
//!
//! - [`optimize_tour`]: ad-hoc requests carrying their own venue set and
//!   weights; nothing is persisted.
//! - [`run_plan_optimization`]: plan-driven — the venue pool, region
//!   filters, business targets, and constraints come from a saved
//!   [`TourPlan`], and the result is persisted as a pending
//!   [`OptimizationRun`] for later confirmation.
//!
//! Confirmation ([`confirm_run`], [`confirm_schedule`]) hands the proposed
//! schedule to the reconciler and, for runs, advances the run lifecycle.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::algorithms::{
    build_schedule, nearest_neighbor_route, score_route, two_opt, venue_map, ScheduleItem,
    VenueMap,
};
use crate::db::{checksum, RepositoryError, TourRepository};
use crate::models::{
    Artist, ArtistId, OptimizationRun, PlanId, PlanTargets, RunId, TourId, UserId, Venue, VenueId,
};
use crate::transformations::filter_venues_by_region;

use super::error::{PlanningError, ServiceResult};
use super::reconcile::{self, ConflictStrategy, ProposedDate, ReconciliationOutcome};
use super::revenue::{estimate_revenue_by_venue, RevenueAdjuster};

/// An ad-hoc optimization request.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizationRequest {
    pub artist_id: ArtistId,
    pub venue_ids: Vec<VenueId>,
    #[serde(default)]
    pub start_venue_id: Option<VenueId>,
    #[serde(default)]
    pub start_city: Option<String>,
    #[serde(default)]
    pub use_ai: bool,
    #[serde(default = "default_cost_per_km")]
    pub cost_per_km: Decimal,
    #[serde(default = "default_weight")]
    pub distance_weight: f64,
    #[serde(default = "default_weight")]
    pub revenue_weight: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub min_gap_days: i64,
    #[serde(default)]
    pub travel_speed_km_per_day: Option<f64>,
}

fn default_cost_per_km() -> Decimal {
    Decimal::new(200, 2)
}

fn default_weight() -> f64 {
    1.0
}

/// Headline numbers comparing the baseline and optimized routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub baseline_distance_km: f64,
    pub optimized_distance_km: f64,
    /// Percent saved over the baseline, 2 decimals; `None` when the baseline
    /// has no measurable distance.
    pub distance_reduction_pct: Option<f64>,
    pub estimated_revenue: f64,
    pub estimated_total_cost: f64,
    /// `(revenue − cost) / cost`, 4 decimals; `None` when cost is zero.
    pub estimated_roi: Option<f64>,
    /// Projected total attendance, 2 decimals. Plan-driven flow only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_attendance: Option<f64>,
}

/// Full result of one optimization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub artist_id: ArtistId,
    pub baseline_route: Vec<VenueId>,
    pub optimized_route: Vec<VenueId>,
    pub metrics: OptimizationMetrics,
    pub schedule: Vec<ScheduleItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_venue_ids: Vec<VenueId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Routing/scheduling knobs shared by both flows.
struct RouteParams {
    cost_per_km: Decimal,
    distance_weight: f64,
    revenue_weight: f64,
    start_date: Option<NaiveDate>,
    min_gap_days: i64,
    travel_speed_km_per_day: Option<f64>,
}

/// Runs an ad-hoc optimization for an owned artist.
///
/// Validates ownership, venue existence, and venue geometry before any
/// routing work. Revenue adjustment runs only when `use_ai` is set and is
/// best-effort — a failing adjuster leaves the base estimates in place.
pub async fn optimize_tour<R: TourRepository>(
    repo: &R,
    adjuster: &dyn RevenueAdjuster,
    request: OptimizationRequest,
    actor: UserId,
) -> ServiceResult<OptimizationOutcome> {
    let artist = owned_artist(repo, request.artist_id, actor).await?;
    if request.venue_ids.is_empty() {
        return Err(PlanningError::Validation(
            "venue_ids must not be empty.".to_string(),
        ));
    }

    let venues = load_venues(repo, &request.venue_ids).await?;
    ensure_geometry(&venues)?;
    let venues_by_id = venue_map(venues);

    let demands = repo
        .demands_for_venues(artist.id, &request.venue_ids)
        .await?;
    let fallback_price = repo.latest_ticket_price(artist.id).await?;
    let mut revenue_by_venue = estimate_revenue_by_venue(&demands, fallback_price);

    let start_venue_id = match request.start_venue_id {
        Some(id) => Some(id),
        None => match request.start_city.as_deref() {
            Some(city) if !city.is_empty() => Some(
                resolve_start_city(city, &request.venue_ids, &venues_by_id, &revenue_by_venue)
                    .ok_or_else(|| {
                        PlanningError::Validation(
                            "No venues found for start_city in selected venues.".to_string(),
                        )
                    })?,
            ),
            _ => None,
        },
    };

    if request.use_ai {
        revenue_by_venue = adjuster.adjust(revenue_by_venue, &venues_by_id).await;
    }

    let params = RouteParams {
        cost_per_km: request.cost_per_km,
        distance_weight: request.distance_weight,
        revenue_weight: request.revenue_weight,
        start_date: request.start_date,
        min_gap_days: request.min_gap_days,
        travel_speed_km_per_day: request.travel_speed_km_per_day,
    };
    let outcome = compute_outcome(
        artist.id,
        &request.venue_ids,
        &venues_by_id,
        &revenue_by_venue,
        start_venue_id,
        &params,
    );

    info!(
        "optimized tour for artist {}: {:.1} km -> {:.1} km over {} venues",
        artist.id,
        outcome.metrics.baseline_distance_km,
        outcome.metrics.optimized_distance_km,
        outcome.optimized_route.len()
    );
    Ok(outcome)
}

/// Runs a plan-driven optimization and persists the result as a pending run.
///
/// The venue pool comes from `venue_ids_override` when non-empty, else the
/// plan. Region filters narrow the pool before validation; excluded ids are
/// reported in the result. Revenue adjustment is always attempted in this
/// flow. Shortfalls against the plan's targets become warnings, never
/// errors.
pub async fn run_plan_optimization<R: TourRepository>(
    repo: &R,
    adjuster: &dyn RevenueAdjuster,
    plan_id: PlanId,
    venue_ids_override: Option<Vec<VenueId>>,
    actor: UserId,
) -> ServiceResult<OptimizationRun> {
    let plan = repo.get_plan(plan_id).await.map_err(not_found("Plan"))?;
    let artist = owned_artist(repo, plan.artist_id, actor).await?;

    let venue_ids = match venue_ids_override {
        Some(ids) if !ids.is_empty() => ids,
        _ => plan.venue_ids.clone(),
    };
    if venue_ids.is_empty() {
        return Err(PlanningError::Validation(
            "No venue_ids provided for this plan.".to_string(),
        ));
    }

    let venues = load_venues(repo, &venue_ids).await?;
    let (venues, excluded_venue_ids) = filter_venues_by_region(venues, &plan.region_filters);
    if venues.is_empty() {
        return Err(PlanningError::Validation(
            "No venues match the region filters.".to_string(),
        ));
    }
    ensure_geometry(&venues)?;
    let venue_ids: Vec<VenueId> = venues.iter().map(|v| v.id).collect();
    let venues_by_id = venue_map(venues);

    let demands = repo.demands_for_venues(artist.id, &venue_ids).await?;
    let fallback_price = repo.latest_ticket_price(artist.id).await?;
    let mut revenue_by_venue = estimate_revenue_by_venue(&demands, fallback_price);
    revenue_by_venue = adjuster.adjust(revenue_by_venue, &venues_by_id).await;

    // Unlike the ad-hoc flow, an unmatched start city is not an error here:
    // the plan simply optimizes without a start anchor.
    let start_venue_id = match plan.constraints.start_venue_id {
        Some(id) => Some(id),
        None if !plan.start_city.is_empty() => resolve_start_city(
            &plan.start_city,
            &venue_ids,
            &venues_by_id,
            &revenue_by_venue,
        ),
        None => None,
    };

    let params = RouteParams {
        cost_per_km: plan.constraints.cost_per_km,
        distance_weight: plan.constraints.distance_weight,
        revenue_weight: plan.constraints.revenue_weight,
        start_date: Some(plan.start_date),
        min_gap_days: plan.constraints.min_gap_days,
        travel_speed_km_per_day: plan.constraints.travel_speed_km_per_day,
    };
    let mut outcome = compute_outcome(
        artist.id,
        &venue_ids,
        &venues_by_id,
        &revenue_by_venue,
        start_venue_id,
        &params,
    );
    outcome.excluded_venue_ids = excluded_venue_ids;

    let expected_attendance = round2(
        demands
            .iter()
            .map(|d| d.expected_attendance().to_f64().unwrap_or(0.0))
            .sum(),
    );
    outcome.metrics.expected_attendance = Some(expected_attendance);
    outcome.warnings = target_warnings(&plan.targets, &outcome.metrics);

    let result = serde_json::to_value(&outcome).map_err(|e| {
        RepositoryError::InternalError(format!("failed to encode run result: {e}"))
    })?;
    let checksum = checksum::run_result_checksum(&result);
    let run = repo.create_run(plan.id, result, checksum).await?;

    info!(
        "stored optimization run {} for plan {} ({} warnings)",
        run.id,
        plan.id,
        outcome.warnings.len()
    );
    Ok(run)
}

/// Confirms a stored run by applying its schedule to bookings.
///
/// The run's snapshot must pass checksum verification. The schedule comes
/// from `schedule_override` when non-empty, else from the snapshot. On
/// success the run transitions to confirmed; on failure it stays pending and
/// can be confirmed again.
pub async fn confirm_run<R: TourRepository>(
    repo: &R,
    run_id: RunId,
    tour_id: TourId,
    schedule_override: Option<Vec<ProposedDate>>,
    conflict_strategy: Option<ConflictStrategy>,
    actor: UserId,
    today: NaiveDate,
) -> ServiceResult<ReconciliationOutcome> {
    let run = repo.get_run(run_id).await.map_err(not_found("Run"))?;
    let plan = repo.get_plan(run.plan_id).await?;
    let artist = owned_artist(repo, plan.artist_id, actor).await?;

    let tour = repo.get_tour(tour_id).await.map_err(not_found("Tour"))?;
    if tour.artist_id != artist.id {
        return Err(PlanningError::NotFound(
            "Tour not found for this artist.".to_string(),
        ));
    }

    if checksum::run_result_checksum(&run.result) != run.checksum {
        return Err(PlanningError::Validation(
            "Run result failed checksum verification.".to_string(),
        ));
    }

    let schedule = match schedule_override {
        Some(items) if !items.is_empty() => items,
        _ => schedule_from_result(&run.result)?,
    };

    let outcome = reconcile::apply_schedule(
        repo,
        &artist,
        &tour,
        &schedule,
        conflict_strategy,
        actor,
        today,
    )
    .await?;
    repo.mark_run_confirmed(run.id).await?;
    Ok(outcome)
}

/// Confirms an ad-hoc schedule (no stored run involved).
pub async fn confirm_schedule<R: TourRepository>(
    repo: &R,
    artist_id: ArtistId,
    tour_id: TourId,
    schedule: &[ProposedDate],
    conflict_strategy: Option<ConflictStrategy>,
    actor: UserId,
    today: NaiveDate,
) -> ServiceResult<ReconciliationOutcome> {
    let artist = owned_artist(repo, artist_id, actor).await?;
    let tour = repo.get_tour(tour_id).await.map_err(not_found("Tour"))?;
    if tour.artist_id != artist.id {
        return Err(PlanningError::NotFound(
            "Tour not found for this artist.".to_string(),
        ));
    }
    if schedule.is_empty() {
        return Err(PlanningError::Validation(
            "schedule must not be empty.".to_string(),
        ));
    }

    reconcile::apply_schedule(repo, &artist, &tour, schedule, conflict_strategy, actor, today)
        .await
}

// ==================== Shared computation ====================

fn compute_outcome(
    artist_id: ArtistId,
    venue_ids: &[VenueId],
    venues_by_id: &VenueMap,
    revenue_by_venue: &HashMap<VenueId, Decimal>,
    start_venue_id: Option<VenueId>,
    params: &RouteParams,
) -> OptimizationOutcome {
    let baseline_route = baseline_route(venue_ids, start_venue_id);
    let constructed = nearest_neighbor_route(venue_ids, venues_by_id, start_venue_id);
    let optimized_route = two_opt(constructed, venues_by_id);

    let baseline = score_route(
        &baseline_route,
        venues_by_id,
        revenue_by_venue,
        params.cost_per_km,
        params.distance_weight,
        params.revenue_weight,
    );
    let optimized = score_route(
        &optimized_route,
        venues_by_id,
        revenue_by_venue,
        params.cost_per_km,
        params.distance_weight,
        params.revenue_weight,
    );

    let distance_reduction_pct = (baseline.distance_km > 0.0).then(|| {
        round2((baseline.distance_km - optimized.distance_km) / baseline.distance_km * 100.0)
    });
    let estimated_roi = (optimized.total_cost > 0.0)
        .then(|| round4((optimized.revenue - optimized.total_cost) / optimized.total_cost));

    let schedule = build_schedule(
        &optimized_route,
        venues_by_id,
        params.start_date,
        params.min_gap_days,
        params.travel_speed_km_per_day,
    );

    OptimizationOutcome {
        artist_id,
        baseline_route,
        optimized_route,
        metrics: OptimizationMetrics {
            baseline_distance_km: baseline.distance_km,
            optimized_distance_km: optimized.distance_km,
            distance_reduction_pct,
            estimated_revenue: optimized.revenue,
            estimated_total_cost: optimized.total_cost,
            estimated_roi,
            expected_attendance: None,
        },
        schedule,
        excluded_venue_ids: Vec::new(),
        warnings: Vec::new(),
    }
}

/// Baseline route: the input order, rotated so the start venue leads.
fn baseline_route(venue_ids: &[VenueId], start_venue_id: Option<VenueId>) -> Vec<VenueId> {
    match start_venue_id {
        Some(start) if venue_ids.contains(&start) => {
            let mut route = Vec::with_capacity(venue_ids.len());
            route.push(start);
            route.extend(venue_ids.iter().copied().filter(|&id| id != start));
            route
        }
        _ => venue_ids.to_vec(),
    }
}

/// Highest-revenue venue whose city label starts with `city`
/// (case-insensitive), in stable input order on ties.
fn resolve_start_city(
    city: &str,
    venue_ids: &[VenueId],
    venues_by_id: &VenueMap,
    revenue_by_venue: &HashMap<VenueId, Decimal>,
) -> Option<VenueId> {
    let wanted = city.to_lowercase();
    let mut best: Option<(VenueId, Decimal)> = None;
    for id in venue_ids {
        let Some(venue) = venues_by_id.get(id) else {
            continue;
        };
        if !venue.city.to_lowercase().starts_with(&wanted) {
            continue;
        }
        let revenue = revenue_by_venue.get(id).copied().unwrap_or(Decimal::ZERO);
        match best {
            Some((_, top)) if revenue <= top => {}
            _ => best = Some((*id, revenue)),
        }
    }
    best.map(|(id, _)| id)
}

fn target_warnings(targets: &PlanTargets, metrics: &OptimizationMetrics) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(min_revenue) = targets.min_revenue {
        if metrics.estimated_revenue < min_revenue.to_f64().unwrap_or(0.0) {
            warnings.push("Estimated revenue is below target.".to_string());
        }
    }
    if let (Some(min_roi), Some(roi)) = (targets.min_roi, metrics.estimated_roi) {
        if roi < min_roi {
            warnings.push("Estimated ROI is below target.".to_string());
        }
    }
    if let (Some(min_attendance), Some(attendance)) =
        (targets.min_attendance, metrics.expected_attendance)
    {
        if attendance < min_attendance {
            warnings.push("Estimated attendance is below target.".to_string());
        }
    }
    warnings
}

// ==================== Validation helpers ====================

async fn owned_artist<R: TourRepository>(
    repo: &R,
    artist_id: ArtistId,
    actor: UserId,
) -> ServiceResult<Artist> {
    let artist = repo
        .get_artist(artist_id)
        .await
        .map_err(not_found("Artist"))?;
    if artist.owner != actor {
        return Err(PlanningError::Ownership(format!(
            "Artist {artist_id} is not owned by the requesting user."
        )));
    }
    Ok(artist)
}

async fn load_venues<R: TourRepository>(
    repo: &R,
    venue_ids: &[VenueId],
) -> ServiceResult<Vec<Venue>> {
    let venues = repo.get_venues(venue_ids).await?;
    if venues.len() != venue_ids.len() {
        return Err(PlanningError::Validation(
            "One or more venues not found.".to_string(),
        ));
    }
    Ok(venues)
}

fn ensure_geometry(venues: &[Venue]) -> ServiceResult<()> {
    let missing: Vec<VenueId> = venues
        .iter()
        .filter(|v| !v.has_geometry())
        .map(|v| v.id)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PlanningError::MissingGeometry { venue_ids: missing })
    }
}

fn schedule_from_result(result: &serde_json::Value) -> ServiceResult<Vec<ProposedDate>> {
    let schedule = result
        .get("schedule")
        .cloned()
        .map(serde_json::from_value::<Vec<ProposedDate>>)
        .transpose()
        .map_err(|e| PlanningError::Validation(format!("Malformed stored schedule: {e}")))?
        .unwrap_or_default();
    if schedule.is_empty() {
        return Err(PlanningError::Validation(
            "No schedule available in this run.".to_string(),
        ));
    }
    Ok(schedule)
}

fn not_found(entity: &str) -> impl FnOnce(RepositoryError) -> PlanningError + '_ {
    move |e| match e {
        RepositoryError::NotFound(_) => {
            PlanningError::NotFound(format!("{entity} not found or not accessible."))
        }
        other => PlanningError::Repository(other),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
