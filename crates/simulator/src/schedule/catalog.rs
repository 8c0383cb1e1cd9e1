//! Route catalog: the static input the schedule is built from.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::StopIdentifier;
use crate::models::{Route, VehicleKind};

#[derive(Clone, Debug, PartialEq)]
pub struct StopDefinition {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    /// x = longitude, y = latitude
    pub location: Point,
}

impl StopDefinition {
    pub fn new(id: impl Into<StopIdentifier>, name: impl Into<Arc<str>>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: Point::new(lon, lat),
        }
    }
}

/// Stop sequence and headway a route's trips are generated from.
///
/// `stops` is the outbound order; inbound trips run it reversed.
#[derive(Clone, Debug, PartialEq)]
pub struct ServicePattern {
    pub stops: Vec<StopDefinition>,
    pub frequency_minutes: u32,
    /// Destination shown on outbound trips
    pub headsign: Arc<str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteDefinition {
    pub route: Route,
    /// Routes without a pattern are listed but never run
    pub pattern: Option<ServicePattern>,
}

impl RouteDefinition {
    pub fn new(route: Route, pattern: ServicePattern) -> Self {
        Self {
            route,
            pattern: Some(pattern),
        }
    }

    pub fn display_only(route: Route) -> Self {
        Self { route, pattern: None }
    }
}

const METRO_COLORS: [(&str, &str); 4] = [
    ("M1", "#E30613"),
    ("M2", "#00843D"),
    ("M3", "#FFD700"),
    ("M5", "#6E3AA7"),
];
const TRAM_COLOR: &str = "#FFD700";
const BUS_COLOR: &str = "#007ACC";

fn stop(id: &str, name: &str, lat: f64, lon: f64) -> StopDefinition {
    StopDefinition::new(id, name, lat, lon)
}

fn line(
    id: &str,
    kind: VehicleKind,
    color: &str,
    frequency_minutes: u32,
    headsign: &str,
    stops: Vec<StopDefinition>,
) -> RouteDefinition {
    RouteDefinition::new(
        Route::new(id, id, kind, color),
        ServicePattern {
            stops,
            frequency_minutes,
            headsign: headsign.into(),
        },
    )
}

fn tram(id: &str, frequency_minutes: u32, headsign: &str, stops: Vec<StopDefinition>) -> RouteDefinition {
    line(id, VehicleKind::Tram, TRAM_COLOR, frequency_minutes, headsign, stops)
}

fn bus(id: &str, frequency_minutes: u32, headsign: &str, stops: Vec<StopDefinition>) -> RouteDefinition {
    line(id, VehicleKind::Bus, BUS_COLOR, frequency_minutes, headsign, stops)
}

fn display_only(id: &str, kind: VehicleKind, color: &str) -> RouteDefinition {
    RouteDefinition::display_only(Route::new(id, id, kind, color))
}

/// The built-in Milan network: main ATM metro, tram and bus lines.
///
/// Metro lines and a handful of tram and bus lines carry no stop pattern and
/// only appear in route listings.
pub fn milan() -> Vec<RouteDefinition> {
    let mut catalog: Vec<RouteDefinition> = METRO_COLORS
        .iter()
        .map(|(id, color)| display_only(id, VehicleKind::Metro, color))
        .collect();

    catalog.extend([
        tram("1", 7, "Greco", vec![
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_cordusio", "Cordusio", 45.4655, 9.1845),
            stop("stop_cairoli", "Cairoli", 45.4685, 9.1850),
            stop("stop_moscova", "Moscova", 45.4730, 9.1870),
            stop("stop_centrale", "Stazione Centrale", 45.4867, 9.2040),
            stop("stop_greco", "Greco", 45.5012, 9.2156),
        ]),
        tram("2", 8, "Piola", vec![
            stop("stop_bausan", "Bausan", 45.4520, 9.1680),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_repubblica", "Repubblica", 45.4810, 9.1990),
            stop("stop_lanza", "Lanza", 45.4730, 9.1870),
            stop("stop_piola", "Piola", 45.4785, 9.2358),
        ]),
        tram("3", 9, "Affori", vec![
            stop("stop_gratosoglio", "Gratosoglio", 45.4245, 9.1456),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_repubblica", "Repubblica", 45.4810, 9.1990),
            stop("stop_affori", "Affori", 45.5125, 9.1868),
        ]),
        tram("4", 10, "Foro Bonaparte", vec![
            stop("stop_niguarda", "Niguarda", 45.5186, 9.1867),
            stop("stop_monumentale", "Monumentale", 45.4856, 9.1806),
            stop("stop_cairoli", "Cairoli", 45.4685, 9.1850),
            stop("stop_foro", "Foro Bonaparte", 45.4725, 9.1820),
        ]),
        tram("5", 8, "Porta Venezia", vec![
            stop("stop_cimitero", "Cimitero Maggiore", 45.4985, 9.1625),
            stop("stop_cadorna", "Cadorna", 45.4690, 9.1740),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_porta_venezia", "Porta Venezia", 45.4750, 9.2050),
        ]),
        tram("9", 7, "Porta Genova", vec![
            stop("stop_centrale", "Stazione Centrale", 45.4867, 9.2040),
            stop("stop_repubblica", "Repubblica", 45.4810, 9.1990),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_genova", "Porta Genova", 45.4535, 9.1685),
        ]),
        tram("10", 9, "Segesta", vec![
            stop("stop_castello", "Piazza Castello", 45.4701, 9.1795),
            stop("stop_cairoli", "Cairoli", 45.4685, 9.1850),
            stop("stop_lanza", "Lanza", 45.4730, 9.1870),
            stop("stop_segesta", "Segesta", 45.4820, 9.1480),
        ]),
        tram("12", 8, "Piazza Fontana", vec![
            stop("stop_roserio", "Roserio", 45.5245, 9.1780),
            stop("stop_monumentale", "Monumentale", 45.4856, 9.1806),
            stop("stop_moscova", "Moscova", 45.4730, 9.1870),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
        ]),
        tram("14", 10, "Bausan", vec![
            stop("stop_cimitero", "Cimitero Maggiore", 45.4985, 9.1625),
            stop("stop_cadorna", "Cadorna", 45.4690, 9.1740),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_bausan", "Bausan", 45.4520, 9.1680),
        ]),
        tram("15", 9, "Piazza Fontana", vec![
            stop("stop_roserio", "Roserio", 45.5245, 9.1780),
            stop("stop_portello", "Portello", 45.4820, 9.1480),
            stop("stop_cadorna", "Cadorna", 45.4690, 9.1740),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
        ]),
        display_only("16", VehicleKind::Tram, TRAM_COLOR),
        display_only("19", VehicleKind::Tram, TRAM_COLOR),
    ]);

    catalog.extend([
        display_only("50", VehicleKind::Bus, BUS_COLOR),
        bus("54", 10, "Romolo", vec![
            stop("stop_precotto", "Precotto M1", 45.5156, 9.2378),
            stop("stop_centrale", "Stazione Centrale", 45.4867, 9.2040),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_sant_ambrogio", "Sant Ambrogio", 45.4625, 9.1745),
            stop("stop_romolo", "Romolo M2", 45.4456, 9.1678),
        ]),
        display_only("57", VehicleKind::Bus, BUS_COLOR),
        bus("60", 12, "Loreto", vec![
            stop("stop_roserio", "Roserio", 45.5245, 9.1780),
            stop("stop_monumentale", "Monumentale", 45.4856, 9.1806),
            stop("stop_repubblica", "Repubblica", 45.4810, 9.1990),
            stop("stop_loreto", "Loreto", 45.4787, 9.2187),
        ]),
        bus("61", 11, "Bisceglie", vec![
            stop("stop_lambrate", "Lambrate", 45.4865, 9.2467),
            stop("stop_centrale", "Stazione Centrale", 45.4867, 9.2040),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_bisceglie", "Bisceglie M1", 45.4675, 9.1245),
        ]),
        display_only("73", VehicleKind::Bus, BUS_COLOR),
        bus("90", 15, "San Babila", vec![
            stop("stop_linate", "Linate Aeroporto", 45.4456, 9.2756),
            stop("stop_forlanini", "Forlanini", 45.4598, 9.2556),
            stop("stop_san_babila", "San Babila M1", 45.4620, 9.1970),
        ]),
        bus("91", 13, "Segesta", vec![
            stop("stop_lampugnano", "Lampugnano M1", 45.5023, 9.1267),
            stop("stop_portello", "Portello", 45.4820, 9.1480),
            stop("stop_segesta", "Segesta M5", 45.4820, 9.1480),
        ]),
        bus("94", 10, "Crocetta", vec![
            stop("stop_famagosta", "Famagosta M2", 45.4378, 9.1567),
            stop("stop_genova", "Porta Genova", 45.4535, 9.1685),
            stop("stop_duomo", "Duomo", 45.4642, 9.1900),
            stop("stop_crocetta", "Crocetta M3", 45.4598, 9.2045),
        ]),
    ]);

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_milan_catalog_shape() {
        let catalog = milan();
        assert_eq!(catalog.len(), 25);

        let ids: HashSet<_> = catalog.iter().map(|d| d.route.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len(), "route ids must be unique");

        let scheduled = catalog.iter().filter(|d| d.pattern.is_some()).count();
        assert_eq!(scheduled, 16);

        assert!(catalog
            .iter()
            .filter(|d| d.route.kind == VehicleKind::Metro)
            .all(|d| d.pattern.is_none()));
    }

    #[test]
    fn test_route_order() {
        let ids: Vec<_> = milan().iter().map(|d| d.route.id.as_str().to_owned()).collect();
        assert_eq!(
            ids,
            vec![
                "M1", "M2", "M3", "M5", "1", "2", "3", "4", "5", "9", "10", "12", "14", "15", "16", "19", "50",
                "54", "57", "60", "61", "73", "90", "91", "94",
            ]
        );
    }

    #[test]
    fn test_patterns_are_usable() {
        for definition in milan() {
            if let Some(pattern) = definition.pattern {
                assert!(pattern.stops.len() >= 2, "route {}", definition.route.id);
                assert!(pattern.frequency_minutes > 0, "route {}", definition.route.id);
            }
        }
    }
}
