//! Calendar date assignment for an ordered route.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::VenueId;

use super::{routing, VenueMap};

/// One dated stop of a proposed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub venue_id: VenueId,
    pub date: NaiveDate,
}

/// Assigns calendar dates to a route.
///
/// Scheduling is opt-in: without a start date the result is empty. The first
/// venue plays on `start_date`; each later venue follows after
/// `max(min_gap_days, travel_days)` where travel days are
/// `ceil(leg_km / travel_speed_km_per_day)` when both the leg distance and a
/// positive speed are known, 0 otherwise. A gap of 0 books the same day.
pub fn build_schedule(
    route: &[VenueId],
    venues: &VenueMap,
    start_date: Option<NaiveDate>,
    min_gap_days: i64,
    travel_speed_km_per_day: Option<f64>,
) -> Vec<ScheduleItem> {
    let Some(start_date) = start_date else {
        return Vec::new();
    };

    let mut schedule = Vec::with_capacity(route.len());
    let mut current_date = start_date;
    for (index, &venue_id) in route.iter().enumerate() {
        schedule.push(ScheduleItem {
            venue_id,
            date: current_date,
        });

        if let Some(&next_id) = route.get(index + 1) {
            let travel_days = travel_days(venue_id, next_id, venues, travel_speed_km_per_day);
            let gap = min_gap_days.max(travel_days);
            current_date = current_date
                .checked_add_days(Days::new(gap.max(0) as u64))
                .unwrap_or(current_date);
        }
    }
    schedule
}

fn travel_days(
    from: VenueId,
    to: VenueId,
    venues: &VenueMap,
    travel_speed_km_per_day: Option<f64>,
) -> i64 {
    let speed = match travel_speed_km_per_day {
        Some(speed) if speed > 0.0 => speed,
        _ => return 0,
    };
    match routing::total_distance_km(&[from, to], venues) {
        Some(distance) => (distance / speed).ceil() as i64,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::venue_map;
    use crate::models::Venue;

    fn venue(id: i64, lat: f64, lon: f64) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: format!("Venue {id}"),
            city: String::new(),
            capacity: 1000,
            latitude: Some(lat),
            longitude: Some(lon),
            operating_cost: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_start_date_yields_empty_schedule() {
        let venues = venue_map([venue(1, 0.0, 0.0)]);
        let schedule = build_schedule(&[VenueId::new(1)], &venues, None, 1, Some(500.0));
        assert!(schedule.is_empty());
    }

    #[test]
    fn travel_time_stretches_the_minimum_gap() {
        // A -> B is ~1145 km (3 travel days at 500 km/day),
        // B -> C is ~800 km (2 travel days).
        let venues = venue_map([
            venue(1, 40.7505, -73.9934),
            venue(2, 41.8807, -87.6742),
            venue(3, 34.6807, -87.6742),
        ]);
        let route = vec![VenueId::new(1), VenueId::new(2), VenueId::new(3)];

        let schedule = build_schedule(&route, &venues, Some(date(2026, 2, 15)), 1, Some(500.0));

        assert_eq!(
            schedule,
            vec![
                ScheduleItem {
                    venue_id: VenueId::new(1),
                    date: date(2026, 2, 15),
                },
                ScheduleItem {
                    venue_id: VenueId::new(2),
                    date: date(2026, 2, 18),
                },
                ScheduleItem {
                    venue_id: VenueId::new(3),
                    date: date(2026, 2, 20),
                },
            ]
        );
    }

    #[test]
    fn zero_gap_books_same_day() {
        let venues = venue_map([venue(1, 0.0, 0.0), venue(2, 0.01, 0.0)]);
        let route = vec![VenueId::new(1), VenueId::new(2)];

        // ~1.1 km apart, no speed given: travel days 0, min gap 0.
        let schedule = build_schedule(&route, &venues, Some(date(2026, 6, 1)), 0, None);
        assert_eq!(schedule[0].date, schedule[1].date);
    }

    #[test]
    fn minimum_gap_applies_without_speed() {
        let venues = venue_map([venue(1, 0.0, 0.0), venue(2, 50.0, 0.0)]);
        let route = vec![VenueId::new(1), VenueId::new(2)];

        let schedule = build_schedule(&route, &venues, Some(date(2026, 6, 1)), 2, None);
        assert_eq!(schedule[1].date, date(2026, 6, 3));
    }

    #[test]
    fn missing_leg_distance_falls_back_to_minimum_gap() {
        let mut venues = venue_map([venue(1, 0.0, 0.0), venue(2, 50.0, 0.0)]);
        venues.get_mut(&VenueId::new(2)).unwrap().latitude = None;
        let route = vec![VenueId::new(1), VenueId::new(2)];

        let schedule = build_schedule(&route, &venues, Some(date(2026, 6, 1)), 1, Some(500.0));
        assert_eq!(schedule[1].date, date(2026, 6, 2));
    }
}
