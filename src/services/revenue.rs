//! Per-venue revenue projection.
//!
//! Revenue math stays in [`Decimal`] until the scorer converts it at the
//! geometric boundary — floating-point summation never leaks back into
//! currency fields.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::algorithms::VenueMap;
use crate::models::{FanDemand, VenueId};

/// Projects expected revenue per venue from fan-demand records.
///
/// Ticket price per record: `expected_ticket_price`, else
/// `fallback_ticket_price` (the artist's most recent booking price), else 0.
/// Revenue is `fan_count × engagement_score × price`, decimal-exact. Venues
/// without a demand record are absent from the map; callers read absent
/// entries as zero.
pub fn estimate_revenue_by_venue(
    fan_demands: &[FanDemand],
    fallback_ticket_price: Option<Decimal>,
) -> HashMap<VenueId, Decimal> {
    let fallback = fallback_ticket_price.unwrap_or(Decimal::ZERO);
    fan_demands
        .iter()
        .map(|demand| {
            let price = demand.expected_ticket_price.unwrap_or(fallback);
            (demand.venue_id, demand.expected_attendance() * price)
        })
        .collect()
}

/// Injectable revenue-adjustment capability.
///
/// Implementations refine the base revenue map with external knowledge (fan
/// density, market timing). Adjustment is best-effort by contract: an
/// implementation that cannot produce adjustments returns the input map
/// unchanged — it must never fail the optimization.
#[async_trait]
pub trait RevenueAdjuster: Send + Sync {
    async fn adjust(
        &self,
        revenue_by_venue: HashMap<VenueId, Decimal>,
        venues: &VenueMap,
    ) -> HashMap<VenueId, Decimal>;
}

/// Default adjuster: returns the estimates untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdjuster;

#[async_trait]
impl RevenueAdjuster for NoopAdjuster {
    async fn adjust(
        &self,
        revenue_by_venue: HashMap<VenueId, Decimal>,
        _venues: &VenueMap,
    ) -> HashMap<VenueId, Decimal> {
        revenue_by_venue
    }
}
