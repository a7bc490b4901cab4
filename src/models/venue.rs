use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::VenueId;

/// A concert venue.
///
/// Coordinates are optional: venues are routinely imported from listings that
/// lack geodata. A venue is *route-eligible* only when both latitude and
/// longitude are present; the optimizer rejects venue sets containing
/// non-eligible venues before any routing work starts.
///
/// The `city` label is free text. By convention it may carry a country after
/// the last comma ("Paris, France"), which region filtering relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub capacity: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Fixed cost of playing this venue, in the tour currency.
    pub operating_cost: Option<Decimal>,
}

impl Venue {
    /// Returns `true` when both coordinates are present.
    pub fn has_geometry(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Country derived from the city label: the text after the last comma,
    /// trimmed. Labels without a comma have no derivable country.
    pub fn country(&self) -> Option<&str> {
        let (_, tail) = self.city.rsplit_once(',')?;
        let tail = tail.trim();
        if tail.is_empty() {
            None
        } else {
            Some(tail)
        }
    }
}
