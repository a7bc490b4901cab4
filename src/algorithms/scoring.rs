//! Route evaluation metrics.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::VenueId;

use super::{total_distance_km, VenueMap};

/// Derived metrics for one candidate route.
///
/// The composite score is informational: it ranks candidate routes for the
/// caller but never feeds back into route construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub score: f64,
    pub distance_km: f64,
    pub revenue: f64,
    pub total_cost: f64,
}

/// Scores a route against projected revenue and travel/operating cost.
///
/// `distance_km` is the haversine total, coerced to 0.0 when any leg is
/// undefined (scoring always yields numbers). `total_cost` is
/// `cost_per_km × distance + Σ operating_cost`; venues missing an operating
/// cost or a revenue entry contribute 0. The composite score is
/// `revenue_weight × revenue − distance_weight × distance_km`.
///
/// Currency quantities arrive as [`Decimal`] and convert to floating point
/// here, at the geometric boundary; the conversion never flows back into
/// persisted fields.
pub fn score_route(
    route: &[VenueId],
    venues: &VenueMap,
    revenue_by_venue: &HashMap<VenueId, Decimal>,
    cost_per_km: Decimal,
    distance_weight: f64,
    revenue_weight: f64,
) -> RouteMetrics {
    let distance_km = total_distance_km(route, venues).unwrap_or(0.0);

    let travel_cost = cost_per_km.to_f64().unwrap_or(0.0) * distance_km;
    let operating_cost: f64 = route
        .iter()
        .filter_map(|id| venues.get(id))
        .filter_map(|venue| venue.operating_cost)
        .map(|cost| cost.to_f64().unwrap_or(0.0))
        .sum();

    let revenue: f64 = route
        .iter()
        .filter_map(|id| revenue_by_venue.get(id))
        .map(|amount| amount.to_f64().unwrap_or(0.0))
        .sum();

    let total_cost = travel_cost + operating_cost;
    let score = revenue_weight * revenue - distance_weight * distance_km;

    RouteMetrics {
        score,
        distance_km,
        revenue,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::venue_map;
    use crate::models::Venue;
    use rust_decimal_macros::dec;

    fn venue(id: i64, lat: f64, operating_cost: Option<Decimal>) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: format!("Venue {id}"),
            city: String::new(),
            capacity: 1000,
            latitude: Some(lat),
            longitude: Some(0.0),
            operating_cost,
        }
    }

    #[test]
    fn score_combines_revenue_and_distance() {
        let venues = venue_map([
            venue(1, 0.0, Some(dec!(1000.00))),
            venue(2, 1.0, Some(dec!(2000.00))),
        ]);
        let revenue = HashMap::from([
            (VenueId::new(1), dec!(50000.00)),
            (VenueId::new(2), dec!(70000.00)),
        ]);
        let route = vec![VenueId::new(1), VenueId::new(2)];

        let metrics = score_route(&route, &venues, &revenue, dec!(2.00), 1.0, 1.0);

        // One degree of latitude is ~111.19 km.
        assert!((metrics.distance_km - 111.19).abs() < 0.1);
        assert_eq!(metrics.revenue, 120_000.0);
        let expected_cost = 2.0 * metrics.distance_km + 3000.0;
        assert!((metrics.total_cost - expected_cost).abs() < 1e-9);
        assert!((metrics.score - (120_000.0 - metrics.distance_km)).abs() < 1e-9);
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let venues = venue_map([venue(1, 0.0, None), venue(2, 1.0, None)]);
        let route = vec![VenueId::new(1), VenueId::new(2)];

        let metrics = score_route(&route, &venues, &HashMap::new(), dec!(0.00), 1.0, 1.0);
        assert_eq!(metrics.revenue, 0.0);
        assert_eq!(metrics.total_cost, 0.0);
    }

    #[test]
    fn undefined_distance_coerces_to_zero() {
        let mut venues = venue_map([venue(1, 0.0, None), venue(2, 1.0, None)]);
        venues.get_mut(&VenueId::new(2)).unwrap().latitude = None;
        let route = vec![VenueId::new(1), VenueId::new(2)];

        let metrics = score_route(&route, &venues, &HashMap::new(), dec!(2.00), 1.0, 1.0);
        assert_eq!(metrics.distance_km, 0.0);
        assert_eq!(metrics.total_cost, 0.0);
    }
}
