//! # Tourcast
//!
//! Tour route optimization engine for touring artists.
//!
//! This crate computes venue visiting orders that approximately minimize
//! travel distance while maximizing projected revenue, derives dated tour
//! schedules with travel-aware gaps, and reconciles proposed schedules
//! against already-booked dates.
//!
//! ## Features
//!
//! - **Routing**: nearest-neighbor construction refined by 2-opt local search
//! - **Revenue Projection**: decimal-exact per-venue revenue from fan demand
//! - **Region Filtering**: narrow a venue set by city/country before routing
//! - **Scheduling**: calendar date assignment respecting minimum gaps and
//!   travel time
//! - **Reconciliation**: conflict detection against existing bookings with
//!   skip/overwrite resolution strategies
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (venues, fan demand, tours, bookings, plans)
//! - [`geo`]: Great-circle distance utility
//! - [`algorithms`]: Route construction, scoring, and date assignment
//! - [`transformations`]: Venue set filtering
//! - [`services`]: High-level business logic (optimization, reconciliation)
//! - [`db`]: Repository pattern and persistence abstraction
//! - [`config`]: TOML-based configuration

pub mod algorithms;
pub mod config;
pub mod db;
pub mod geo;
pub mod models;
pub mod services;
pub mod transformations;
