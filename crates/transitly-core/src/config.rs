// ── Runtime simulator configuration ──
//
// Describes *how* the simulated feed behaves: timer cadence, randomness,
// and tuning. Never touches disk; consumers build a `SimulatorConfig` and
// hand it in.

use std::time::Duration;

use crate::engine::SimulationTuning;
use crate::error::CoreError;

/// Configuration for a single simulation session.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Update Engine cadence. `Duration::ZERO` disables periodic ticks.
    pub update_interval: Duration,
    /// Connection Simulator cadence. `Duration::ZERO` disables it.
    pub connection_interval: Duration,
    /// Delay between `refresh_data()` and its out-of-band tick.
    pub refresh_delay: Duration,
    /// Delay before the initial handshake marks the feed connected.
    /// `Duration::ZERO` skips the handshake.
    pub handshake_delay: Duration,
    /// Seed for a reproducible session. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub tuning: SimulationTuning,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_secs(5),
            connection_interval: Duration::from_secs(2),
            refresh_delay: Duration::from_millis(500),
            handshake_delay: Duration::from_secs(1),
            seed: None,
            tuning: SimulationTuning::default(),
        }
    }
}

impl SimulatorConfig {
    /// No timers at all: state only changes through explicit calls.
    /// Used by one-shot CLI invocations.
    pub fn manual() -> Self {
        Self {
            update_interval: Duration::ZERO,
            connection_interval: Duration::ZERO,
            handshake_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.tuning.validate()
    }
}
