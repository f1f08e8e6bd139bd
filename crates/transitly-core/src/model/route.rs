// ── Route domain type ──

use serde::{Deserialize, Serialize};

use super::geo::Position;
use super::ids::RouteId;

/// A transit line. Routes are static for the lifetime of a session; the
/// simulator never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    /// Display name, e.g. "14 Mission".
    pub name: String,
    /// Rendering color (opaque to the core, typically `#rrggbb`).
    pub color: String,
    /// Ordered shape points.
    pub path: Vec<Position>,
    pub is_active: bool,
}
