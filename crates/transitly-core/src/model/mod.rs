// ── Transit domain model ──
//
// Plain value types. Nothing here has behavior beyond derived views;
// all mutation happens by building new snapshots in the engine.

pub mod bus;
pub mod city;
pub mod geo;
pub mod ids;
pub mod route;
pub mod status;
pub mod stop;

pub use bus::{Bus, FeedBadge, MAX_SPEED, Occupancy};
pub use city::{City, SUPPORTED_CITIES, find_city};
pub use geo::Position;
pub use ids::{BusId, RouteId, StopId};
pub use route::Route;
pub use status::ConnectionStatus;
pub use stop::{Arrival, Eta, EtaParseError, Stop};
