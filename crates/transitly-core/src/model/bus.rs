// ── Vehicle domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

use super::geo::Position;
use super::ids::{BusId, RouteId};

/// Upper bound for a vehicle's reported speed.
pub const MAX_SPEED: u32 = 35;

/// Coarse ridership level reported by a vehicle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Occupancy {
    Low,
    Medium,
    High,
}

impl Occupancy {
    /// Approximate load factor shown on arrival cards.
    pub fn load_percent(self) -> u8 {
        match self {
            Self::Low => 30,
            Self::Medium => 65,
            Self::High => 90,
        }
    }

    /// Rough head count used by vehicle detail views.
    pub fn estimated_passengers(self) -> u32 {
        match self {
            Self::Low => 12,
            Self::Medium => 25,
            Self::High => 35,
        }
    }
}

/// How fresh a prediction is, as shown next to a vehicle or arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "minutes")]
pub enum FeedBadge {
    /// Static timetable prediction, no live tracking.
    Schedule,
    /// Live tracking reports the vehicle running late.
    Delayed(u32),
    /// Live tracking, on time.
    Live,
}

impl FeedBadge {
    pub fn new(is_realtime: bool, delay_minutes: Option<u32>) -> Self {
        match (is_realtime, delay_minutes) {
            (false, _) => Self::Schedule,
            (true, Some(minutes)) if minutes > 0 => Self::Delayed(minutes),
            (true, _) => Self::Live,
        }
    }
}

impl std::fmt::Display for FeedBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schedule => f.write_str("Schedule"),
            Self::Delayed(minutes) => write!(f, "+{minutes} min"),
            Self::Live => f.write_str("Live"),
        }
    }
}

/// A tracked vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: BusId,
    pub route: RouteId,
    pub position: Position,
    /// Degrees clockwise from north. Kept within `[0, 360)` unless
    /// `SimulationTuning::normalize_heading` is off.
    pub heading: f64,
    pub occupancy: Occupancy,
    /// Whole units, always within `[0, MAX_SPEED]`.
    pub speed: u32,
    /// Free-text name of the next stop.
    pub next_stop: String,
    pub is_realtime: bool,
    pub last_updated: DateTime<Utc>,
    /// Minutes behind schedule. `None` means on time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
}

impl Bus {
    pub fn badge(&self) -> FeedBadge {
        FeedBadge::new(self.is_realtime, self.delay)
    }
}
