// ── Simulation tuning ──
//
// Probabilities and magnitudes driving the simulated feed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::MAX_SPEED;

/// Per-tick chance that a bus reports a new occupancy level.
pub const OCCUPANCY_CHANGE_PROBABILITY: f64 = 0.10;
/// Per-tick chance that a bus reports a delay.
pub const DELAY_PROBABILITY: f64 = 0.30;
/// Per-tick chance that a realtime ETA drops by one minute.
pub const ETA_DECREMENT_PROBABILITY: f64 = 0.50;
/// Per-connection-tick chance of a dropped feed.
pub const CONNECTION_FAILURE_PROBABILITY: f64 = 0.05;
/// Per-connection-tick chance that an errored feed starts reconnecting.
pub const CONNECTION_RECOVERY_PROBABILITY: f64 = 0.70;
/// Half-width of the per-axis GPS jitter, in degrees.
pub const POSITION_JITTER_DEGREES: f64 = 0.000_25;
/// Half-width of the per-tick speed change.
pub const SPEED_JITTER: f64 = 2.5;
/// Half-width of the per-tick heading change, in degrees.
pub const HEADING_JITTER_DEGREES: f64 = 5.0;
/// Largest delay a bus can report, in minutes.
pub const MAX_DELAY_MINUTES: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTuning {
    pub occupancy_change_probability: f64,
    pub delay_probability: f64,
    pub eta_decrement_probability: f64,
    pub connection_failure_probability: f64,
    pub connection_recovery_probability: f64,
    pub position_jitter_degrees: f64,
    pub speed_jitter: f64,
    /// Speed ceiling; may be lowered but never raised above `MAX_SPEED`.
    pub max_speed: u32,
    pub heading_jitter_degrees: f64,
    pub max_delay_minutes: u32,
    /// Wrap headings into `[0, 360)` after perturbation.
    pub normalize_heading: bool,
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self {
            occupancy_change_probability: OCCUPANCY_CHANGE_PROBABILITY,
            delay_probability: DELAY_PROBABILITY,
            eta_decrement_probability: ETA_DECREMENT_PROBABILITY,
            connection_failure_probability: CONNECTION_FAILURE_PROBABILITY,
            connection_recovery_probability: CONNECTION_RECOVERY_PROBABILITY,
            position_jitter_degrees: POSITION_JITTER_DEGREES,
            speed_jitter: SPEED_JITTER,
            max_speed: MAX_SPEED,
            heading_jitter_degrees: HEADING_JITTER_DEGREES,
            max_delay_minutes: MAX_DELAY_MINUTES,
            normalize_heading: true,
        }
    }
}

impl SimulationTuning {
    pub fn validate(&self) -> Result<(), CoreError> {
        let probabilities = [
            ("occupancy_change_probability", self.occupancy_change_probability),
            ("delay_probability", self.delay_probability),
            ("eta_decrement_probability", self.eta_decrement_probability),
            ("connection_failure_probability", self.connection_failure_probability),
            ("connection_recovery_probability", self.connection_recovery_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::InvalidConfig {
                    message: format!("{name} must be within [0, 1], got {p}"),
                });
            }
        }

        let magnitudes = [
            ("position_jitter_degrees", self.position_jitter_degrees),
            ("speed_jitter", self.speed_jitter),
            ("heading_jitter_degrees", self.heading_jitter_degrees),
        ];
        for (name, m) in magnitudes {
            if !m.is_finite() || m < 0.0 {
                return Err(CoreError::InvalidConfig {
                    message: format!("{name} must be a non-negative number, got {m}"),
                });
            }
        }

        if self.max_speed > MAX_SPEED {
            return Err(CoreError::InvalidConfig {
                message: format!("max_speed must be at most {MAX_SPEED}, got {}", self.max_speed),
            });
        }
        Ok(())
    }
}
