// ── Connection Simulator ──
//
// Models a flaky feed: occasional drops, probabilistic recovery, and a
// one-tick reconnect. Touches `connection_status` only.

use super::random::RandomSource;
use super::tuning::SimulationTuning;
use crate::model::ConnectionStatus;

#[derive(Debug, Clone, Default)]
pub struct ConnectionSimulator {
    tuning: SimulationTuning,
}

impl ConnectionSimulator {
    pub fn new(tuning: SimulationTuning) -> Self {
        Self { tuning }
    }

    /// Status after one connection tick.
    ///
    /// A drop can strike from any state. Otherwise `error` recovers to
    /// `connecting` with the configured probability, `connecting` always
    /// completes to `connected`, and everything else holds.
    pub fn next_status(
        &self,
        current: ConnectionStatus,
        rng: &mut dyn RandomSource,
    ) -> ConnectionStatus {
        if rng.chance(self.tuning.connection_failure_probability) {
            return ConnectionStatus::Error;
        }

        match current {
            ConnectionStatus::Error => {
                if rng.chance(self.tuning.connection_recovery_probability) {
                    ConnectionStatus::Connecting
                } else {
                    ConnectionStatus::Error
                }
            }
            ConnectionStatus::Connecting => ConnectionStatus::Connected,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::scripted::Scripted;

    fn sim() -> ConnectionSimulator {
        ConnectionSimulator::default()
    }

    #[test]
    fn connected_drops_to_error_below_threshold() {
        let mut rng = Scripted::new([0.04]);
        assert_eq!(
            sim().next_status(ConnectionStatus::Connected, &mut rng),
            ConnectionStatus::Error
        );
    }

    #[test]
    fn connected_holds_above_threshold() {
        let mut rng = Scripted::new([0.05]);
        assert_eq!(
            sim().next_status(ConnectionStatus::Connected, &mut rng),
            ConnectionStatus::Connected
        );
    }

    #[test]
    fn error_recovers_to_connecting() {
        let mut rng = Scripted::new([0.5, 0.69]);
        assert_eq!(
            sim().next_status(ConnectionStatus::Error, &mut rng),
            ConnectionStatus::Connecting
        );
    }

    #[test]
    fn error_stays_when_recovery_draw_misses() {
        let mut rng = Scripted::new([0.5, 0.7]);
        assert_eq!(
            sim().next_status(ConnectionStatus::Error, &mut rng),
            ConnectionStatus::Error
        );
    }

    #[test]
    fn connecting_always_completes() {
        let mut rng = Scripted::new([0.99]);
        assert_eq!(
            sim().next_status(ConnectionStatus::Connecting, &mut rng),
            ConnectionStatus::Connected
        );
    }

    #[test]
    fn full_outage_and_recovery_cycle() {
        let sim = sim();
        let mut rng = Scripted::new([0.01, 0.5, 0.3, 0.5]);
        let mut status = ConnectionStatus::Connected;

        status = sim.next_status(status, &mut rng);
        assert_eq!(status, ConnectionStatus::Error);
        status = sim.next_status(status, &mut rng);
        assert_eq!(status, ConnectionStatus::Connecting);
        status = sim.next_status(status, &mut rng);
        assert_eq!(status, ConnectionStatus::Connected);
    }

    #[test]
    fn disconnected_is_never_entered() {
        let sim = sim();
        let mut rng = Scripted::new(std::iter::empty()).with_fallback(0.5);
        for start in [
            ConnectionStatus::Connected,
            ConnectionStatus::Connecting,
            ConnectionStatus::Error,
        ] {
            assert_ne!(
                sim.next_status(start, &mut rng),
                ConnectionStatus::Disconnected
            );
        }
    }
}
