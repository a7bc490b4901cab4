//! Persistence abstraction for the planning domain.
//!
//! Storage is expressed as a set of focused async repository traits; the
//! services layer is generic over them. The only implementation shipped with
//! this crate is the in-memory [`repositories::LocalRepository`], suitable
//! for tests and local development — durable backends live behind the same
//! traits in deployment-specific crates.

pub mod checksum;
pub mod repositories;
pub mod repository;

pub use repository::{
    BookingRepository, CatalogRepository, DemandRepository, NewTourDate, PlanRepository,
    RepositoryError, RepositoryResult, TourRepository,
};
