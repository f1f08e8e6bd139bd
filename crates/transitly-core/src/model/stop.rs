// ── Stop and arrival domain types ──

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bus::FeedBadge;
use super::geo::Position;
use super::ids::{BusId, RouteId, StopId};

const ARRIVING: &str = "Arriving";

/// Predicted time until a vehicle reaches a stop.
///
/// A zero-minute prediction is unrepresentable: it is always `Arriving`.
/// Serialized the way riders read it: `"Arriving"` or `"<n> min"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Eta {
    Arriving,
    Minutes(NonZeroU32),
}

impl Eta {
    /// Build from a whole-minute count, mapping zero to `Arriving`.
    pub fn from_minutes(minutes: u32) -> Self {
        NonZeroU32::new(minutes).map_or(Self::Arriving, Self::Minutes)
    }

    pub fn minutes(self) -> u32 {
        match self {
            Self::Arriving => 0,
            Self::Minutes(n) => n.get(),
        }
    }

    /// One minute closer, floored at `Arriving`.
    pub fn decremented(self) -> Self {
        Self::from_minutes(self.minutes().saturating_sub(1))
    }

    pub fn is_arriving(self) -> bool {
        matches!(self, Self::Arriving)
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arriving => f.write_str(ARRIVING),
            Self::Minutes(n) => write!(f, "{n} min"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ETA '{0}': expected \"Arriving\" or \"<minutes> min\"")]
pub struct EtaParseError(String);

impl FromStr for Eta {
    type Err = EtaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ARRIVING) {
            return Ok(Self::Arriving);
        }

        let digits = trimmed
            .strip_suffix("min")
            .map_or(trimmed, str::trim_end);
        digits
            .parse::<u32>()
            .map(Self::from_minutes)
            .map_err(|_| EtaParseError(s.to_owned()))
    }
}

impl From<Eta> for String {
    fn from(eta: Eta) -> Self {
        eta.to_string()
    }
}

impl TryFrom<String> for Eta {
    type Error = EtaParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One upcoming arrival at a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrival {
    pub route: RouteId,
    pub eta: Eta,
    /// Live-tracked prediction. Schedule-only arrivals never change.
    pub realtime: bool,
    /// The vehicle producing this prediction, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<BusId>,
}

impl Arrival {
    /// Badge for this arrival, given the delay reported by its vehicle (if any).
    pub fn badge(&self, vehicle_delay: Option<u32>) -> FeedBadge {
        FeedBadge::new(self.realtime, vehicle_delay)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub position: Position,
    /// Routes serving this stop.
    pub routes: Vec<RouteId>,
    /// Upcoming arrivals, soonest first as published by the feed.
    pub next_arrivals: Vec<Arrival>,
    pub last_updated: DateTime<Utc>,
}

impl Stop {
    pub fn serves(&self, route: &RouteId) -> bool {
        self.routes.contains(route)
    }
}
