//! Regional narrowing of a plan's venue pool.

use crate::models::{RegionFilters, Venue, VenueId};

/// Filters venues by the plan's region dimensions.
///
/// Returns the venues that passed and the ids of those excluded. With no
/// dimensions requested every venue passes. A venue must satisfy ALL
/// requested dimensions:
///
/// - **cities**: case-insensitive prefix match of the city label against any
///   requested city
/// - **countries**: case-insensitive equality of the derived country (text
///   after the last comma of the city label) against any requested country
/// - **continents**: always fails — see below
pub fn filter_venues_by_region(
    venues: Vec<Venue>,
    filters: &RegionFilters,
) -> (Vec<Venue>, Vec<VenueId>) {
    if filters.is_empty() {
        return (venues, Vec::new());
    }

    let mut kept = Vec::with_capacity(venues.len());
    let mut excluded = Vec::new();
    for venue in venues {
        if matches_region(&venue, filters) {
            kept.push(venue);
        } else {
            excluded.push(venue.id);
        }
    }
    (kept, excluded)
}

fn matches_region(venue: &Venue, filters: &RegionFilters) -> bool {
    if !filters.cities.is_empty() {
        let city = venue.city.to_lowercase();
        let matched = filters
            .cities
            .iter()
            .any(|wanted| city.starts_with(&wanted.to_lowercase()));
        if !matched {
            return false;
        }
    }

    if !filters.countries.is_empty() {
        let matched = match venue.country() {
            Some(country) => filters
                .countries
                .iter()
                .any(|wanted| country.eq_ignore_ascii_case(wanted)),
            None => false,
        };
        if !matched {
            return false;
        }
    }

    // TODO: continent matching needs a country -> continent table; until one
    // is wired in, requesting continents excludes every venue.
    if !filters.continents.is_empty() {
        return false;
    }

    true
}
