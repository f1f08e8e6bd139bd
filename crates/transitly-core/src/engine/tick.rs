// ── Update Engine ──
//
// One simulated tick of live telemetry: buses drift, ridership and speed
// wander, delays are redrawn, and realtime ETAs count down. The result is a
// brand-new snapshot; the input is never touched.

use chrono::{DateTime, Utc};

use super::random::RandomSource;
use super::tuning::SimulationTuning;
use crate::model::{Arrival, Bus, ConnectionStatus, Occupancy, Stop};
use crate::store::TransitSnapshot;

use strum::VariantArray;

/// Pure snapshot transformer for a single tick.
#[derive(Debug, Clone, Default)]
pub struct UpdateEngine {
    tuning: SimulationTuning,
}

impl UpdateEngine {
    pub fn new(tuning: SimulationTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &SimulationTuning {
        &self.tuning
    }

    /// Compute the snapshot one tick after `prev`.
    ///
    /// A committed tick always implies a healthy feed, so the status is set
    /// to `connected` and the update counter advances by exactly one.
    pub fn advance(
        &self,
        prev: &TransitSnapshot,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> TransitSnapshot {
        let buses = prev
            .buses
            .iter()
            .map(|bus| self.advance_bus(bus, now, rng))
            .collect();
        let stops = prev
            .stops
            .iter()
            .map(|stop| self.advance_stop(stop, now, rng))
            .collect();

        TransitSnapshot {
            city: prev.city.clone(),
            buses,
            stops,
            routes: prev.routes.clone(),
            last_update: Some(now),
            connection_status: ConnectionStatus::Connected,
            update_count: prev.update_count + 1,
        }
    }

    /// Draw order: lat, lng, occupancy (+pick), speed, heading, delay (+value).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
    fn advance_bus(&self, bus: &Bus, now: DateTime<Utc>, rng: &mut dyn RandomSource) -> Bus {
        let t = &self.tuning;

        let position = bus.position.offset(
            rng.symmetric(t.position_jitter_degrees),
            rng.symmetric(t.position_jitter_degrees),
        );

        let occupancy = if rng.chance(t.occupancy_change_probability) {
            pick_occupancy(rng).unwrap_or(bus.occupancy)
        } else {
            bus.occupancy
        };

        let max_speed = f64::from(t.max_speed);
        let speed = (f64::from(bus.speed) + rng.symmetric(t.speed_jitter))
            .clamp(0.0, max_speed)
            .round() as u32;

        let raw_heading = bus.heading + rng.symmetric(t.heading_jitter_degrees);
        let heading = if t.normalize_heading {
            raw_heading.rem_euclid(360.0)
        } else {
            raw_heading
        };

        let delay = rng
            .chance(t.delay_probability)
            .then(|| rng.below(t.max_delay_minutes.saturating_add(1)));

        Bus {
            position,
            occupancy,
            speed,
            heading,
            delay,
            last_updated: now,
            ..bus.clone()
        }
    }

    fn advance_stop(&self, stop: &Stop, now: DateTime<Utc>, rng: &mut dyn RandomSource) -> Stop {
        let next_arrivals = stop
            .next_arrivals
            .iter()
            .map(|arrival| self.advance_arrival(arrival, rng))
            .collect();

        Stop {
            next_arrivals,
            last_updated: now,
            ..stop.clone()
        }
    }

    /// Schedule-only arrivals are returned unchanged and consume no draw.
    fn advance_arrival(&self, arrival: &Arrival, rng: &mut dyn RandomSource) -> Arrival {
        if !arrival.realtime {
            return arrival.clone();
        }

        let eta = if rng.chance(self.tuning.eta_decrement_probability) {
            arrival.eta.decremented()
        } else {
            arrival.eta
        };

        Arrival {
            eta,
            ..arrival.clone()
        }
    }
}

fn pick_occupancy(rng: &mut dyn RandomSource) -> Option<Occupancy> {
    let len = u32::try_from(Occupancy::VARIANTS.len()).ok()?;
    let idx = usize::try_from(rng.below(len)).ok()?;
    Occupancy::VARIANTS.get(idx).copied()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::random::StdRandom;
    use crate::engine::random::scripted::Scripted;
    use crate::model::{Eta, Occupancy};
    use crate::seed;

    fn engine() -> UpdateEngine {
        UpdateEngine::default()
    }

    fn seeded() -> TransitSnapshot {
        seed::dataset("sf", Utc::now())
    }

    #[test]
    fn commits_connected_and_counts() {
        let prev = seeded();
        let now = Utc::now();
        let next = engine().advance(&prev, now, &mut StdRandom::seeded(1));

        assert_eq!(next.update_count, prev.update_count + 1);
        assert_eq!(next.connection_status, ConnectionStatus::Connected);
        assert_eq!(next.last_update, Some(now));
        assert!(next.buses.iter().all(|b| b.last_updated == now));
        assert!(next.stops.iter().all(|s| s.last_updated == now));
    }

    #[test]
    fn routes_are_shared_not_copied() {
        let prev = seeded();
        let next = engine().advance(&prev, Utc::now(), &mut StdRandom::seeded(1));
        assert!(std::sync::Arc::ptr_eq(&prev.routes, &next.routes));
    }

    #[test]
    fn speed_stays_integral_and_bounded() {
        let engine = engine();
        let mut rng = StdRandom::seeded(99);
        let mut snap = seeded();
        for _ in 0..2_000 {
            snap = engine.advance(&snap, Utc::now(), &mut rng);
            for bus in &snap.buses {
                assert!(bus.speed <= 35, "speed {} out of range", bus.speed);
                assert!((0.0..360.0).contains(&bus.heading));
                assert!(bus.delay.is_none_or(|d| d <= 4));
            }
        }
    }

    #[test]
    fn eta_never_renders_zero_minutes() {
        let engine = engine();
        let mut rng = StdRandom::seeded(5);
        let mut snap = seeded();
        for _ in 0..100 {
            snap = engine.advance(&snap, Utc::now(), &mut rng);
            for stop in &snap.stops {
                for arrival in &stop.next_arrivals {
                    assert_ne!(arrival.eta.to_string(), "0 min");
                }
            }
        }
        // 100 ticks at 50% is plenty to drain the short realtime ETAs.
        let stop1 = snap.stops.iter().find(|s| s.id == "stop1").unwrap();
        assert_eq!(stop1.next_arrivals[0].eta, Eta::Arriving);
    }

    #[test]
    fn schedule_arrivals_never_change() {
        let engine = engine();
        let mut rng = StdRandom::seeded(11);
        let initial = seeded();
        let mut snap = initial.clone();
        for _ in 0..50 {
            snap = engine.advance(&snap, Utc::now(), &mut rng);
        }
        for (before, after) in initial.stops.iter().zip(&snap.stops) {
            for (a, b) in before.next_arrivals.iter().zip(&after.next_arrivals) {
                if !a.realtime {
                    assert_eq!(a.eta.to_string(), b.eta.to_string());
                }
            }
        }
    }

    #[test]
    fn scripted_tick_applies_exact_transitions() {
        // bus1: lat, lng, occupancy hit + pick "high", speed +2, heading -5,
        // delay hit + 3 minutes.
        // bus2: centered jitter, no occupancy change, speed -2.5, heading +5,
        // no delay.
        // Stops: stop1 14 decrements, 30 holds; stop2 8 decrements; stop3 27 holds.
        let draws = [
            0.5, 0.5, 0.05, 0.9, 0.9, 0.0, 0.1, 0.7, //
            0.5, 0.5, 0.5, 0.0, 1.0 - f64::EPSILON, 0.9, //
            0.1, 0.9, //
            0.1, //
            0.9,
        ];
        let mut rng = Scripted::new(draws);
        let prev = seeded();
        let next = engine().advance(&prev, Utc::now(), &mut rng);
        assert_eq!(rng.remaining(), 0);

        let bus1 = &next.buses[0];
        assert_eq!(bus1.occupancy, Occupancy::High);
        assert_eq!(bus1.speed, 17);
        assert!((bus1.heading - 40.0).abs() < 1e-9);
        assert_eq!(bus1.delay, Some(3));
        assert!((bus1.position.lat - prev.buses[0].position.lat).abs() < 1e-12);

        let bus2 = &next.buses[1];
        assert_eq!(bus2.occupancy, Occupancy::Low);
        assert_eq!(bus2.speed, 20);
        assert!((bus2.heading - 185.0).abs() < 1e-6);
        assert_eq!(bus2.delay, None);

        let etas: Vec<Vec<String>> = next
            .stops
            .iter()
            .map(|s| s.next_arrivals.iter().map(|a| a.eta.to_string()).collect())
            .collect();
        assert_eq!(
            etas,
            [
                vec!["1 min", "5 min", "12 min"],
                vec!["2 min", "8 min"],
                vec!["6 min", "15 min"],
            ]
        );
    }

    #[test]
    fn speed_clamps_at_bounds() {
        let mut prev = seeded();
        prev.buses.truncate(1);
        prev.stops.clear();
        prev.buses[0].speed = 35;

        // No occupancy change, max positive speed delta, no delay.
        let mut rng = Scripted::new([0.5, 0.5, 0.9, 1.0 - f64::EPSILON, 0.5, 0.9]);
        let next = engine().advance(&prev, Utc::now(), &mut rng);
        assert_eq!(next.buses[0].speed, 35);

        let mut low = prev.clone();
        low.buses[0].speed = 1;
        let mut rng = Scripted::new([0.5, 0.5, 0.9, 0.0, 0.5, 0.9]);
        let next = engine().advance(&low, Utc::now(), &mut rng);
        assert_eq!(next.buses[0].speed, 0);
    }

    #[test]
    fn heading_wraps_below_zero() {
        let mut prev = seeded();
        prev.buses.truncate(1);
        prev.stops.clear();
        prev.buses[0].heading = 2.0;

        let mut rng = Scripted::new([0.5, 0.5, 0.9, 0.5, 0.0, 0.9]);
        let next = engine().advance(&prev, Utc::now(), &mut rng);
        assert!((next.buses[0].heading - 357.0).abs() < 1e-9);
    }

    #[test]
    fn heading_left_raw_when_normalization_disabled() {
        let engine = UpdateEngine::new(SimulationTuning {
            normalize_heading: false,
            ..SimulationTuning::default()
        });
        let mut prev = seeded();
        prev.buses.truncate(1);
        prev.stops.clear();
        prev.buses[0].heading = 2.0;

        let mut rng = Scripted::new([0.5, 0.5, 0.9, 0.5, 0.0, 0.9]);
        let next = engine.advance(&prev, Utc::now(), &mut rng);
        assert!((next.buses[0].heading + 3.0).abs() < 1e-9);
    }

    #[test]
    fn delay_is_redrawn_not_accumulated() {
        let mut prev = seeded();
        prev.buses.truncate(1);
        prev.stops.clear();
        prev.buses[0].delay = Some(4);

        let mut rng = Scripted::new([0.5, 0.5, 0.9, 0.5, 0.5, 0.9]);
        let next = engine().advance(&prev, Utc::now(), &mut rng);
        assert_eq!(next.buses[0].delay, None);
    }

    #[test]
    fn widest_delay_range_does_not_overflow() {
        let engine = UpdateEngine::new(SimulationTuning {
            max_delay_minutes: u32::MAX,
            ..SimulationTuning::default()
        });
        let mut prev = seeded();
        prev.buses.truncate(1);
        prev.stops.clear();

        let mut rng = Scripted::new([0.5, 0.5, 0.9, 0.5, 0.5, 0.1, 0.0]);
        let next = engine.advance(&prev, Utc::now(), &mut rng);
        assert_eq!(next.buses[0].delay, Some(0));
        assert_eq!(rng.remaining(), 0);
    }
}
