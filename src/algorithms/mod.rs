//! Route construction, scoring, and date assignment.
//!
//! This module provides the algorithmic core of tour planning: building a
//! venue visiting order, evaluating it, and attaching calendar dates.
//!
//! # Components
//!
//! - [`routing`]: Nearest-neighbor construction and 2-opt local search
//! - [`scoring`]: Distance/revenue/cost metrics for a candidate route
//! - [`scheduling`]: Travel-aware calendar date assignment
//!
//! All functions are pure and deterministic: tie-breaking follows the stable
//! iteration order of the input collections, never hidden global state.

pub mod routing;
pub mod scheduling;
pub mod scoring;

pub use routing::{nearest_neighbor_route, total_distance_km, two_opt};
pub use scheduling::{build_schedule, ScheduleItem};
pub use scoring::{score_route, RouteMetrics};

use std::collections::HashMap;

use crate::models::{Venue, VenueId};

/// Venue lookup used by every routing computation.
pub type VenueMap = HashMap<VenueId, Venue>;

/// Builds a [`VenueMap`] from a venue list.
pub fn venue_map(venues: impl IntoIterator<Item = Venue>) -> VenueMap {
    venues.into_iter().map(|v| (v.id, v)).collect()
}
