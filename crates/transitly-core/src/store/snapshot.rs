// ── Immutable transit snapshot ──
//
// The single aggregate the store publishes. Every mutation builds a new
// value; readers holding an `Arc<TransitSnapshot>` never observe a change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Arrival, Bus, BusId, ConnectionStatus, Route, RouteId, Stop, StopId};

/// Complete state of all transit entities plus feed metadata at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitSnapshot {
    /// City identifier the session was started for.
    pub city: String,
    pub buses: Vec<Bus>,
    pub stops: Vec<Stop>,
    /// Routes never change during a session, so snapshots share them.
    pub routes: Arc<Vec<Route>>,
    /// Time of the last successful update, `None` until the feed first connects.
    pub last_update: Option<DateTime<Utc>>,
    pub connection_status: ConnectionStatus,
    /// Committed Update Engine passes since the session started.
    pub update_count: u64,
}

impl TransitSnapshot {
    /// Fresh session state: `connecting`, never updated.
    pub fn new(city: impl Into<String>, buses: Vec<Bus>, stops: Vec<Stop>, routes: Vec<Route>) -> Self {
        Self {
            city: city.into(),
            buses,
            stops,
            routes: Arc::new(routes),
            last_update: None,
            connection_status: ConnectionStatus::default(),
            update_count: 0,
        }
    }

    /// Placeholder held before any session starts: no entities, `disconnected`.
    pub fn idle() -> Self {
        Self {
            connection_status: ConnectionStatus::Disconnected,
            ..Self::new(String::new(), Vec::new(), Vec::new(), Vec::new())
        }
    }

    pub fn with_status(&self, status: ConnectionStatus) -> Self {
        Self {
            connection_status: status,
            ..self.clone()
        }
    }

    // ── Derived flags ────────────────────────────────────────────────

    pub fn is_loading(&self) -> bool {
        self.connection_status.is_loading()
    }

    pub fn has_error(&self) -> bool {
        self.connection_status.has_error()
    }

    /// How long ago the last successful update happened.
    pub fn data_age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.last_update.map(|t| now - t)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn bus(&self, id: &BusId) -> Option<&Bus> {
        self.buses.iter().find(|b| &b.id == id)
    }

    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.iter().find(|s| &s.id == id)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| &r.id == id)
    }

    pub fn stops_serving<'a>(&'a self, route: &'a RouteId) -> impl Iterator<Item = &'a Stop> + 'a {
        self.stops.iter().filter(move |s| s.serves(route))
    }

    /// Every arrival the given vehicle is producing, paired with its stop.
    pub fn arrivals_for_bus<'a>(
        &'a self,
        bus: &'a BusId,
    ) -> impl Iterator<Item = (&'a Stop, &'a Arrival)> + 'a {
        self.stops.iter().flat_map(move |stop| {
            stop.next_arrivals
                .iter()
                .filter(move |a| a.vehicle_id.as_ref() == Some(bus))
                .map(move |a| (stop, a))
        })
    }

    /// Delay reported by the vehicle behind an arrival, if it is tracked.
    pub fn delay_for(&self, arrival: &Arrival) -> Option<u32> {
        arrival
            .vehicle_id
            .as_ref()
            .and_then(|id| self.bus(id))
            .and_then(|b| b.delay)
    }
}

/// Read-side projection handed to presentation code: the snapshot plus the
/// two convenience flags, recomputed from the status on every read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    #[serde(flatten)]
    pub snapshot: Arc<TransitSnapshot>,
    pub is_loading: bool,
    pub has_error: bool,
}

impl From<Arc<TransitSnapshot>> for SnapshotView {
    fn from(snapshot: Arc<TransitSnapshot>) -> Self {
        Self {
            is_loading: snapshot.is_loading(),
            has_error: snapshot.has_error(),
            snapshot,
        }
    }
}

impl std::ops::Deref for SnapshotView {
    type Target = TransitSnapshot;

    fn deref(&self) -> &Self::Target {
        &self.snapshot
    }
}
