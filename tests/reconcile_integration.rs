//! Integration tests for schedule reconciliation against bookings.

mod support;

use rust_decimal_macros::dec;
use support::{date, seeded_repo, OWNER, STRANGER};
use tourcast::db::BookingRepository;
use tourcast::models::{ArtistId, TourId, VenueId};
use tourcast::services::{
    confirm_schedule, ConflictStrategy, PlanningError, ProposedDate,
};

const TODAY: (i32, u32, u32) = (2026, 1, 10);

fn today() -> chrono::NaiveDate {
    date(TODAY.0, TODAY.1, TODAY.2)
}

fn proposed(venue: i64, iso_date: &str) -> ProposedDate {
    ProposedDate {
        venue_id: VenueId::new(venue),
        date: iso_date.to_string(),
    }
}

#[tokio::test]
async fn fresh_dates_create_priced_bookings() {
    let (repo, artist_id, tour_id) = seeded_repo();

    let outcome = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-02-15"), proposed(2, "2026-02-18")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.created_ids.len(), 2);
    assert!(outcome.conflicts.is_empty());

    // Prices come from each venue's demand record.
    let booking = repo
        .find_booking(artist_id, date(2026, 2, 15))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.ticket_price, dec!(120.00));
    assert_eq!(booking.venue_id, VenueId(1));
}

#[tokio::test]
async fn price_falls_back_to_most_recent_booking() {
    let (repo, artist_id, tour_id) = seeded_repo();
    // Venue 5 has no demand record; the artist's latest booking sets the price.
    repo.insert_venue(support::venue(5, "Quiet Club", "Boston, USA", 42.3663, -71.0622, None));

    confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(2, "2026-02-10")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();

    confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(5, "2026-03-01")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();

    let booking = repo
        .find_booking(artist_id, date(2026, 3, 1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.ticket_price, dec!(110.00));
}

#[tokio::test]
async fn conflict_without_strategy_reports_and_aborts() {
    let (repo, artist_id, tour_id) = seeded_repo();

    confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();
    assert_eq!(repo.booking_count(), 1);

    // Same date, different venue: exactly one conflict, nothing changed.
    let err = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(2, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap_err();

    match err {
        PlanningError::Conflicts { conflicts } => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].date, date(2026, 2, 15));
            assert_eq!(conflicts[0].existing_venue_id, VenueId(1));
            assert_eq!(conflicts[0].new_venue_id, VenueId(2));
        }
        other => panic!("expected Conflicts, got {other:?}"),
    }
    assert_eq!(repo.booking_count(), 1);
    let untouched = repo
        .find_booking(artist_id, date(2026, 2, 15))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.venue_id, VenueId(1));
}

#[tokio::test]
async fn overwrite_strategy_rebooks_the_existing_date() {
    let (repo, artist_id, tour_id) = seeded_repo();

    confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();

    let outcome = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(2, "2026-02-15")],
        Some(ConflictStrategy::Overwrite),
        OWNER,
        today(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.overwritten_ids.len(), 1);
    assert_eq!(outcome.conflicts.len(), 1);
    assert!(outcome.created_ids.is_empty());

    let rebooked = repo
        .find_booking(artist_id, date(2026, 2, 15))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rebooked.venue_id, VenueId(2));
    // Overwrite applies the new venue's demand price.
    assert_eq!(rebooked.ticket_price, dec!(110.00));
    assert_eq!(repo.booking_count(), 1);
}

#[tokio::test]
async fn skip_strategy_leaves_existing_bookings_alone() {
    let (repo, artist_id, tour_id) = seeded_repo();

    confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();

    let outcome = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(2, "2026-02-15"), proposed(3, "2026-02-20")],
        Some(ConflictStrategy::Skip),
        OWNER,
        today(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.skipped_dates, vec![date(2026, 2, 15)]);
    assert_eq!(outcome.created_ids.len(), 1);
    let kept = repo
        .find_booking(artist_id, date(2026, 2, 15))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.venue_id, VenueId(1));
}

#[tokio::test]
async fn abort_after_partial_batch_keeps_earlier_creations() {
    let (repo, artist_id, tour_id) = seeded_repo();

    confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap();

    // First item is free, second collides; without a strategy the batch
    // aborts after the pass but the first creation is already committed.
    let err = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(3, "2026-02-10"), proposed(2, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PlanningError::Conflicts { .. }));
    assert_eq!(repo.booking_count(), 2);
    assert!(repo
        .find_booking(artist_id, date(2026, 2, 10))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn malformed_and_past_dates_are_rejected() {
    let (repo, artist_id, tour_id) = seeded_repo();

    let err = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "02/15/2026")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlanningError::Validation(_)));

    // Not strictly in the future relative to the reference date.
    let err = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-01-10")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlanningError::Validation(_)));
    assert_eq!(repo.booking_count(), 0);
}

#[tokio::test]
async fn only_the_owner_can_confirm() {
    let (repo, artist_id, tour_id) = seeded_repo();

    let err = confirm_schedule(
        &repo,
        artist_id,
        tour_id,
        &[proposed(1, "2026-02-15")],
        None,
        STRANGER,
        today(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlanningError::Ownership(_)));

    let err = confirm_schedule(
        &repo,
        ArtistId::new(99),
        tour_id,
        &[proposed(1, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlanningError::NotFound(_)));

    let err = confirm_schedule(
        &repo,
        artist_id,
        TourId::new(99),
        &[proposed(1, "2026-02-15")],
        None,
        OWNER,
        today(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PlanningError::NotFound(_)));
}
