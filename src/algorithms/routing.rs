//! Venue route construction.
//!
//! A route is an ordered sequence of distinct venue ids. Construction is a
//! two-stage heuristic: greedy nearest-neighbor ordering, then
//! first-improvement 2-opt refinement. Venue counts are small (tens), so the
//! quadratic scans are deliberate — simplicity and determinism over
//! asymptotics.

use crate::geo::haversine_km;
use crate::models::VenueId;

use super::VenueMap;

/// Haversine distance between two venues by id. `None` when either venue is
/// unknown or lacks coordinates.
fn leg_km(a: VenueId, b: VenueId, venues: &VenueMap) -> Option<f64> {
    let a = venues.get(&a)?;
    let b = venues.get(&b)?;
    haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Total distance of a route in kilometers, or `None` when any leg is
/// undefined.
pub fn total_distance_km(route: &[VenueId], venues: &VenueMap) -> Option<f64> {
    route
        .windows(2)
        .map(|pair| leg_km(pair[0], pair[1], venues))
        .sum()
}

/// Builds an initial route by always traveling to the closest unvisited
/// venue.
///
/// The route starts at `start_id` when it is a member of `venue_ids`,
/// otherwise at the first id in input order. Undefined distances rank as
/// infinite, so a venue without coordinates is only chosen once nothing else
/// remains. Ties keep the earliest candidate in input order.
pub fn nearest_neighbor_route(
    venue_ids: &[VenueId],
    venues: &VenueMap,
    start_id: Option<VenueId>,
) -> Vec<VenueId> {
    let Some(&first) = venue_ids.first() else {
        return Vec::new();
    };
    let start = match start_id {
        Some(id) if venue_ids.contains(&id) => id,
        _ => first,
    };

    let mut remaining: Vec<VenueId> = venue_ids.iter().copied().filter(|&id| id != start).collect();
    let mut route = vec![start];
    let mut last = start;

    while !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (index, &candidate) in remaining.iter().enumerate() {
            let distance = leg_km(last, candidate, venues).unwrap_or(f64::INFINITY);
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        last = remaining.remove(best_index);
        route.push(last);
    }

    route
}

/// Refines a route with first-improvement 2-opt.
///
/// Scans every segment reversal `(i, j)` with `1 <= i < j <= len - 2` (both
/// endpoints stay anchored), adopts the first reversal that strictly shortens
/// the total distance, and restarts the scan. Terminates when a full scan
/// finds no improvement. A route whose total distance is undefined ranks as
/// infinitely long and is never adopted over a defined one.
pub fn two_opt(route: Vec<VenueId>, venues: &VenueMap) -> Vec<VenueId> {
    let mut best = route;
    if best.len() < 4 {
        return best;
    }

    let mut best_distance = total_distance_km(&best, venues).unwrap_or(f64::INFINITY);
    let mut improved = true;
    while improved {
        improved = false;
        'scan: for i in 1..best.len() - 2 {
            for j in i + 1..best.len() - 1 {
                let mut candidate = best.clone();
                candidate[i..=j].reverse();
                let candidate_distance =
                    total_distance_km(&candidate, venues).unwrap_or(f64::INFINITY);
                if candidate_distance < best_distance {
                    best = candidate;
                    best_distance = candidate_distance;
                    improved = true;
                    break 'scan;
                }
            }
        }
    }

    best
}
