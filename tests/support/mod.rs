//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use tourcast::db::repositories::LocalRepository;
use tourcast::models::{
    Artist, ArtistId, FanDemand, Tour, TourId, UserId, Venue, VenueId,
};

pub const OWNER: UserId = UserId(1);
pub const STRANGER: UserId = UserId(2);

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn venue(id: i64, name: &str, city: &str, lat: f64, lon: f64, cost: Option<Decimal>) -> Venue {
    Venue {
        id: VenueId::new(id),
        name: name.to_string(),
        city: city.to_string(),
        capacity: 10_000,
        latitude: Some(lat),
        longitude: Some(lon),
        operating_cost: cost,
    }
}

pub fn demand(
    artist: ArtistId,
    venue: i64,
    fans: u64,
    engagement: Decimal,
    price: Option<Decimal>,
) -> FanDemand {
    FanDemand {
        artist_id: artist,
        venue_id: VenueId::new(venue),
        fan_count: fans,
        engagement_score: engagement,
        expected_ticket_price: price,
    }
}

/// Repository seeded with one owned artist, a tour, and three US venues with
/// demand records (New York, Chicago, Los Angeles).
pub fn seeded_repo() -> (LocalRepository, ArtistId, TourId) {
    let repo = LocalRepository::new();
    let artist_id = ArtistId::new(1);
    let tour_id = TourId::new(1);

    repo.insert_artist(Artist {
        id: artist_id,
        name: "Optimizer Artist".to_string(),
        genre: "Pop".to_string(),
        owner: OWNER,
    });
    repo.insert_tour(Tour {
        id: tour_id,
        artist_id,
        name: "Opt Tour".to_string(),
        start_date: None,
        end_date: None,
        description: String::new(),
        created_by: OWNER,
    });

    repo.insert_venue(venue(
        1,
        "Opt Venue A",
        "New York, USA",
        40.7505,
        -73.9934,
        Some(Decimal::new(5_000_000, 2)),
    ));
    repo.insert_venue(venue(
        2,
        "Opt Venue B",
        "Chicago, USA",
        41.8807,
        -87.6742,
        Some(Decimal::new(4_200_000, 2)),
    ));
    repo.insert_venue(venue(
        3,
        "Opt Venue C",
        "Los Angeles, USA",
        34.0430,
        -118.2673,
        Some(Decimal::new(6_000_000, 2)),
    ));

    repo.insert_demand(demand(
        artist_id,
        1,
        100_000,
        Decimal::new(10, 2),
        Some(Decimal::new(12_000, 2)),
    ));
    repo.insert_demand(demand(
        artist_id,
        2,
        80_000,
        Decimal::new(9, 2),
        Some(Decimal::new(11_000, 2)),
    ));
    repo.insert_demand(demand(
        artist_id,
        3,
        90_000,
        Decimal::new(11, 2),
        Some(Decimal::new(13_000, 2)),
    ));

    (repo, artist_id, tour_id)
}
