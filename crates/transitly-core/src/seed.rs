// ── Seed datasets ──
//
// Initial state loaded when a session starts. Only one dataset exists
// (downtown San Francisco); every city id currently receives it.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::model::{
    Arrival, Bus, BusId, Eta, Occupancy, Position, Route, RouteId, Stop, StopId, find_city,
};
use crate::store::TransitSnapshot;

/// Build the initial snapshot for `city`, stamping entities with `now`.
pub fn dataset(city: &str, now: DateTime<Utc>) -> TransitSnapshot {
    if find_city(city).is_none() {
        debug!(city, "unknown city id; using default seed dataset");
    }
    TransitSnapshot::new(city, buses(now), stops(now), routes())
}

fn routes() -> Vec<Route> {
    vec![
        Route {
            id: RouteId::from("14"),
            name: "14 Mission".into(),
            color: "#3b82f6".into(),
            path: vec![
                Position::new(37.7749, -122.4194),
                Position::new(37.7849, -122.4094),
                Position::new(37.7949, -122.3994),
            ],
            is_active: true,
        },
        Route {
            id: RouteId::from("30"),
            name: "30 Stockton".into(),
            color: "#10b981".into(),
            path: vec![
                Position::new(37.7649, -122.4294),
                Position::new(37.7749, -122.4194),
                Position::new(37.7849, -122.4094),
            ],
            is_active: true,
        },
    ]
}

fn arrival(route: &str, minutes: u32, realtime: bool, vehicle: Option<&str>) -> Arrival {
    Arrival {
        route: RouteId::from(route),
        eta: Eta::from_minutes(minutes),
        realtime,
        vehicle_id: vehicle.map(BusId::from),
    }
}

fn stops(now: DateTime<Utc>) -> Vec<Stop> {
    vec![
        Stop {
            id: StopId::from("stop1"),
            name: "Market & 3rd St".into(),
            position: Position::new(37.7749, -122.4194),
            routes: vec!["14".into(), "30".into(), "45".into()],
            next_arrivals: vec![
                arrival("14", 2, true, Some("bus1")),
                arrival("30", 5, true, Some("bus2")),
                arrival("45", 12, false, None),
            ],
            last_updated: now,
        },
        Stop {
            id: StopId::from("stop2"),
            name: "Mission & 1st St".into(),
            position: Position::new(37.7849, -122.4094),
            routes: vec!["8".into(), "12".into()],
            next_arrivals: vec![arrival("8", 3, true, None), arrival("12", 8, false, None)],
            last_updated: now,
        },
        Stop {
            id: StopId::from("stop3"),
            name: "Folsom & 2nd St".into(),
            position: Position::new(37.7649, -122.4294),
            routes: vec!["27".into(), "30".into()],
            next_arrivals: vec![arrival("27", 6, true, None), arrival("30", 15, false, None)],
            last_updated: now,
        },
    ]
}

fn buses(now: DateTime<Utc>) -> Vec<Bus> {
    vec![
        Bus {
            id: BusId::from("bus1"),
            route: RouteId::from("14"),
            position: Position::new(37.7749, -122.4194),
            heading: 45.0,
            occupancy: Occupancy::Medium,
            speed: 15,
            next_stop: "Market & 3rd St".into(),
            is_realtime: true,
            last_updated: now,
            delay: None,
        },
        Bus {
            id: BusId::from("bus2"),
            route: RouteId::from("30"),
            position: Position::new(37.7849, -122.4094),
            heading: 180.0,
            occupancy: Occupancy::Low,
            speed: 22,
            next_stop: "Mission & 1st St".into(),
            is_realtime: true,
            last_updated: now,
            delay: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectionStatus;

    #[test]
    fn sf_seed_has_documented_shape() {
        let snap = dataset("sf", Utc::now());
        assert_eq!(snap.stops.len(), 3);
        assert_eq!(snap.buses.len(), 2);
        assert_eq!(snap.routes.len(), 2);
        assert_eq!(snap.connection_status, ConnectionStatus::Connecting);
        assert_eq!(snap.update_count, 0);
        assert!(snap.last_update.is_none());

        let bus1 = &snap.buses[0];
        assert_eq!(bus1.id, "bus1");
        assert_eq!(bus1.route, "14");
        assert_eq!(bus1.occupancy, Occupancy::Medium);
        assert_eq!(bus1.speed, 15);
        assert!(bus1.delay.is_none());
    }

    #[test]
    fn every_bus_references_a_seeded_route() {
        let snap = dataset("sf", Utc::now());
        for bus in &snap.buses {
            assert!(snap.route(&bus.route).is_some(), "dangling route {}", bus.route);
        }
    }

    #[test]
    fn unknown_city_still_seeds() {
        let snap = dataset("atlantis", Utc::now());
        assert_eq!(snap.city, "atlantis");
        assert_eq!(snap.buses.len(), 2);
    }
}
