use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ArtistId, VenueId};

/// Fan-demand estimate for one (artist, venue) pair.
///
/// `fan_count` is the estimated local fan base; `engagement_score` is the
/// fraction of those fans expected to attend (defaults to 0.10). Expected
/// attendance is `fan_count × engagement_score`, and expected revenue is
/// attendance times the ticket price — `expected_ticket_price` when set,
/// otherwise a caller-supplied fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanDemand {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub fan_count: u64,
    #[serde(default = "default_engagement_score")]
    pub engagement_score: Decimal,
    pub expected_ticket_price: Option<Decimal>,
}

fn default_engagement_score() -> Decimal {
    // 0.10
    Decimal::new(10, 2)
}

impl FanDemand {
    /// Expected attendance for this record, decimal-exact.
    pub fn expected_attendance(&self) -> Decimal {
        Decimal::from(self.fan_count) * self.engagement_score
    }
}
