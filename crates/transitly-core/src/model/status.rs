// ── Feed connection status ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse health of the (simulated) live data feed.
///
/// Independent of entity freshness: an `Error` status means the last
/// snapshot may be stale, not that it is invalid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Connecting,
    Disconnected,
    Error,
}

impl ConnectionStatus {
    /// Human-readable banner text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Live data connected",
            Self::Connecting => "Connecting...",
            Self::Error => "Connection error",
            Self::Disconnected => "Disconnected",
        }
    }

    pub fn is_loading(self) -> bool {
        matches!(self, Self::Connecting)
    }

    pub fn has_error(self) -> bool {
        matches!(self, Self::Error)
    }
}
