//! Service-level error taxonomy.
//!
//! Variants carry HTTP-equivalent meanings for the hosting boundary:
//! validation failures map to 400, ownership to 403, missing entities to
//! 404, and unresolved schedule conflicts to 409. External-service
//! degradation (revenue adjustment) never surfaces here — it is recovered
//! inside the adjuster.

use crate::db::RepositoryError;
use crate::models::VenueId;

use super::reconcile::ScheduleConflict;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, PlanningError>;

/// Error type for planning service operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// Malformed or unacceptable input; nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// Venues missing latitude/longitude; routing requires both.
    #[error("all venues must include latitude/longitude")]
    MissingGeometry { venue_ids: Vec<VenueId> },

    /// The acting user does not own the artist being operated on.
    #[error("{0}")]
    Ownership(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Proposed dates collide with existing bookings and no resolution
    /// strategy was supplied. Carries the full list so the caller can
    /// resubmit with one.
    #[error("schedule conflicts found; resubmit with a conflict strategy")]
    Conflicts { conflicts: Vec<ScheduleConflict> },

    /// Storage-layer failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
