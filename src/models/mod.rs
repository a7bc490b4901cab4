//! Domain models for tour planning.
//!
//! This module provides the core data structures of the planning domain:
//! artists and the venues they can play, fan-demand records used for revenue
//! projection, tours and their booked dates, and saved tour plans with their
//! optimization runs.
//!
//! Identifiers are integer newtypes so that a `VenueId` can never be passed
//! where a `TourId` is expected.

mod demand;
mod plan;
mod tour;
mod venue;

pub use demand::FanDemand;
pub use plan::{
    OptimizationRun, PlanConstraints, PlanTargets, RegionFilters, RunStatus, TourPlan,
};
pub use tour::{Artist, Tour, TourDate};
pub use venue::Venue;

/// Generates an integer id newtype for one domain entity.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of an [`Artist`].
    ArtistId
);
id_type!(
    /// Identifier of a [`Venue`].
    VenueId
);
id_type!(
    /// Identifier of a [`Tour`].
    TourId
);
id_type!(
    /// Identifier of a booked [`TourDate`].
    TourDateId
);
id_type!(
    /// Identifier of a [`TourPlan`].
    PlanId
);
id_type!(
    /// Identifier of an [`OptimizationRun`].
    RunId
);
id_type!(
    /// Identifier of the acting user (ownership checks only; authentication
    /// itself lives outside this crate).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_newtypes_are_distinct_types() {
        let venue = VenueId::new(7);
        assert_eq!(venue.value(), 7);
        assert_eq!(venue.to_string(), "7");
    }

    #[test]
    fn id_serializes_as_bare_integer() {
        let id = ArtistId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: ArtistId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
