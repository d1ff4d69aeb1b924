//! Static catalog of the Toulouse Métropole weather stations.
//!
//! Single access point to the known stations and the Explore v2.1 endpoints
//! serving their records. The catalog is fixed configuration, not fetched
//! data.

use crate::meteopole::LatLon;
use haversine::{distance, Location, Units};

const BASE_URL: &str = "https://data.toulouse-metropole.fr/api/explore/v2.1/catalog/datasets";

/// One station of the open-data catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationEntry {
    /// Human-facing station name, used as the lookup key throughout the crate.
    pub name: &'static str,
    /// Dataset identifier under the Explore v2.1 catalog.
    pub dataset: &'static str,
    /// Station coordinates.
    pub location: LatLon,
}

impl StationEntry {
    /// Records endpoint of this station, ordered newest first.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/records?order_by=heure_utc%20desc",
            BASE_URL, self.dataset
        )
    }
}

const STATIONS: &[StationEntry] = &[
    StationEntry {
        name: "Compans-Caffarelli",
        dataset: "42-station-meteo-toulouse-parc-compans-cafarelli",
        location: LatLon(43.6112, 1.4358),
    },
    StationEntry {
        name: "Université Paul Sabatier",
        dataset: "37-station-meteo-toulouse-universite-paul-sabatier",
        location: LatLon(43.5620, 1.4687),
    },
    StationEntry {
        name: "Pech David",
        dataset: "13-station-meteo-toulouse-pech-david",
        location: LatLon(43.5643, 1.4474),
    },
];

/// Registry of the known stations and their API endpoints.
pub struct StationRegistry;

impl StationRegistry {
    /// All catalog entries.
    pub fn stations() -> &'static [StationEntry] {
        STATIONS
    }

    /// Names of the known stations, in catalog order.
    pub fn station_names() -> Vec<&'static str> {
        STATIONS.iter().map(|station| station.name).collect()
    }

    /// Looks up a station by name.
    pub fn find(name: &str) -> Option<&'static StationEntry> {
        STATIONS.iter().find(|station| station.name == name)
    }

    /// Builds the records endpoint for a station name.
    pub fn endpoint_for(name: &str) -> Option<String> {
        Self::find(name).map(StationEntry::endpoint)
    }

    /// Returns the station closest to `location` within `max_distance_km`,
    /// along with its great-circle distance in kilometers.
    pub fn nearest(location: LatLon, max_distance_km: f64) -> Option<(&'static StationEntry, f64)> {
        STATIONS
            .iter()
            .map(|station| (station, distance_km(location, station.location)))
            .filter(|(_, km)| *km <= max_distance_km)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

fn distance_km(a: LatLon, b: LatLon) -> f64 {
    distance(
        Location {
            latitude: a.0,
            longitude: a.1,
        },
        Location {
            latitude: b.0,
            longitude: b.1,
        },
        Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_the_three_toulouse_stations() {
        let names = StationRegistry::station_names();
        assert_eq!(
            names,
            ["Compans-Caffarelli", "Université Paul Sabatier", "Pech David"]
        );
    }

    #[test]
    fn endpoints_order_records_newest_first() {
        let endpoint = StationRegistry::endpoint_for("Pech David").unwrap();
        assert!(endpoint.starts_with("https://data.toulouse-metropole.fr/"));
        assert!(endpoint.contains("13-station-meteo-toulouse-pech-david"));
        assert!(endpoint.ends_with("records?order_by=heure_utc%20desc"));
    }

    #[test]
    fn unknown_station_has_no_endpoint() {
        assert!(StationRegistry::endpoint_for("Capitole").is_none());
        assert!(StationRegistry::find("").is_none());
    }

    #[test]
    fn nearest_picks_the_closest_station() {
        // Place Saint-Sernin, a few hundred meters from Compans-Caffarelli.
        let (station, km) = StationRegistry::nearest(LatLon(43.6086, 1.4420), 50.0).unwrap();
        assert_eq!(station.name, "Compans-Caffarelli");
        assert!(km < 2.0, "expected under 2 km, got {km}");
    }

    #[test]
    fn nearest_respects_the_search_radius() {
        // Paris is roughly 590 km away from Toulouse.
        let paris = LatLon(48.8566, 2.3522);
        assert!(StationRegistry::nearest(paris, 50.0).is_none());
        let (_, km) = StationRegistry::nearest(paris, 1000.0).unwrap();
        assert!(km > 500.0);
    }
}
