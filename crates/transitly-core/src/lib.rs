//! Real-time transit state simulator behind the `transitly` CLI.
//!
//! This crate owns the domain model, the simulation engine, and the reactive
//! snapshot store:
//!
//! - **[`Controller`]**: session facade. [`start()`](Controller::start) seeds
//!   the store and spawns the update, connection, and handshake timers;
//!   [`refresh_data()`](Controller::refresh_data) schedules an out-of-band
//!   tick; [`Controller::oneshot()`](Controller::oneshot) runs a timer-free
//!   session for single CLI invocations.
//!
//! - **[`DataStore`]**: one immutable [`TransitSnapshot`] behind an
//!   `ArcSwap`, with serialized writers and a `tokio::sync::watch` channel
//!   that publishes every committed replacement.
//!
//! - **[`SnapshotStream`]**: subscription handle vended by the store.
//!   Exposes `current()` / `latest()` / `changed()` and a `Stream` adapter.
//!
//! - **Engine** ([`engine`]): the pure Update Engine and Connection
//!   Simulator, parameterized by [`SimulationTuning`] and an injectable
//!   [`RandomSource`].
//!
//! - **Domain model** ([`model`]): buses, stops, routes, arrivals, and the
//!   supported-city catalog.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod model;
pub mod seed;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SimulatorConfig;
pub use controller::Controller;
pub use engine::{ConnectionSimulator, RandomSource, SimulationTuning, StdRandom, UpdateEngine};
pub use error::CoreError;
pub use store::{DataStore, SnapshotView, TransitSnapshot};
pub use stream::SnapshotStream;

pub use model::{
    Arrival, Bus, BusId, City, ConnectionStatus, Eta, FeedBadge, Occupancy, Position, Route,
    RouteId, SUPPORTED_CITIES, Stop, StopId, find_city,
};
