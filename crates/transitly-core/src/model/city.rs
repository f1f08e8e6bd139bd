// ── Supported city catalog ──

use serde::Serialize;

/// A metro area the client can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: &'static str,
    pub name: &'static str,
    pub state: &'static str,
    pub country: &'static str,
    /// Whether the agency publishes live vehicle positions.
    pub has_realtime: bool,
    /// IANA timezone name.
    pub timezone: &'static str,
}

pub const SUPPORTED_CITIES: &[City] = &[
    City {
        id: "sf",
        name: "San Francisco",
        state: "CA",
        country: "US",
        has_realtime: true,
        timezone: "America/Los_Angeles",
    },
    City {
        id: "nyc",
        name: "New York City",
        state: "NY",
        country: "US",
        has_realtime: true,
        timezone: "America/New_York",
    },
    City {
        id: "seattle",
        name: "Seattle",
        state: "WA",
        country: "US",
        has_realtime: true,
        timezone: "America/Los_Angeles",
    },
    City {
        id: "portland",
        name: "Portland",
        state: "OR",
        country: "US",
        has_realtime: false,
        timezone: "America/Los_Angeles",
    },
    City {
        id: "boston",
        name: "Boston",
        state: "MA",
        country: "US",
        has_realtime: true,
        timezone: "America/New_York",
    },
    City {
        id: "chicago",
        name: "Chicago",
        state: "IL",
        country: "US",
        has_realtime: true,
        timezone: "America/Chicago",
    },
];

/// Look up a supported city by id (case-insensitive).
pub fn find_city(id: &str) -> Option<&'static City> {
    SUPPORTED_CITIES
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_id_case_insensitive() {
        assert_eq!(find_city("SF").map(|c| c.name), Some("San Francisco"));
        assert!(find_city("atlantis").is_none());
    }

    #[test]
    fn portland_is_schedule_only() {
        assert!(find_city("portland").is_some_and(|c| !c.has_realtime));
    }
}
