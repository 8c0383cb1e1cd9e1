use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use transit_simulator::prelude::*;
use transit_simulator::simulation::{is_active, position_of};

// 2024-03-13 was a Wednesday, 2024-03-16 a Saturday
fn wednesday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap().and_hms_opt(h, m, 0).unwrap()
}

fn saturday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 16).unwrap().and_hms_opt(h, m, 0).unwrap()
}

#[test]
fn snapshots_hold_invariants_across_the_day() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for hour in 0..24 {
        for minute in [0, 17, 33, 58] {
            let now = wednesday(hour, minute);
            let vehicles = snapshot_with_rng(&schedule, now, &mut rng);

            let ids: HashSet<_> = vehicles.iter().map(|v| v.id.clone()).collect();
            assert_eq!(ids.len(), vehicles.len(), "vehicle ids must be unique at {now}");

            for v in &vehicles {
                assert!((0.0..360.0).contains(&v.heading_degrees));
                assert!((10.0..=50.0).contains(&v.speed_kmh));
                assert_eq!(v.observed_at, now);

                let trip = schedule.trip(&v.trip_id).expect("snapshot trip exists");
                let minutes = ServiceTime::from_naive_time(now.time());
                assert!(is_active(trip, minutes, now.weekday()));
                assert_eq!(trip.route_id(), &v.route_id);
                assert_eq!(&*v.destination, trip.headsign());
            }
        }
    }
}

#[test]
fn service_starts_at_five() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();

    assert!(snapshot(&schedule, wednesday(4, 59)).is_empty());
    assert!(!snapshot(&schedule, wednesday(5, 1)).is_empty());
}

#[test]
fn display_only_routes_never_appear() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();
    let vehicles = snapshot(&schedule, wednesday(12, 0));

    assert!(vehicles.iter().all(|v| v.vehicle_kind != VehicleKind::Metro));
    assert!(schedule.route(&RouteIdentifier::new("M2")).is_some());
}

#[test]
fn weekend_is_empty_unless_mirrored() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();
    assert!(snapshot(&schedule, saturday(12, 0)).is_empty());

    let mirrored = Schedule::with_config(
        catalog::milan(),
        SimulationConfig {
            weekend_service: WeekendService::MirrorWeekday,
            ..Default::default()
        },
    )
    .unwrap();

    let weekday_count = snapshot(&mirrored, wednesday(12, 0)).len();
    let weekend_count = snapshot(&mirrored, saturday(12, 0)).len();
    assert!(weekend_count > 0);
    assert_eq!(weekday_count, weekend_count);
}

#[test]
fn filtered_snapshot_is_a_subset() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();
    let now = wednesday(18, 0);
    let wanted = [RouteIdentifier::new("1"), RouteIdentifier::new("90")];

    let filtered = snapshot_for_routes(&schedule, now, &wanted, &mut StdRng::seed_from_u64(9));
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|v| wanted.contains(&v.route_id)));

    let everything = snapshot_with_rng(&schedule, now, &mut StdRng::seed_from_u64(9));
    let all_ids: HashSet<_> = everything.iter().map(|v| v.id.clone()).collect();
    assert!(filtered.iter().all(|v| all_ids.contains(&v.id)));
}

#[test]
fn positions_lie_between_bracketing_stops() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();
    let now = ServiceTime::from_hm(9, 0);

    for route in schedule.routes() {
        for trip in schedule.trips(&route.id) {
            let Some(position) = position_of(trip, now, schedule.config()) else {
                continue;
            };

            let from = &trip.stop_times()[position.segment];
            let to = &trip.stop_times()[position.segment + 1];
            let (lo_lat, hi_lat) = (from.lat().min(to.lat()), from.lat().max(to.lat()));
            let (lo_lon, hi_lon) = (from.lon().min(to.lon()), from.lon().max(to.lon()));

            assert!((0.0..1.0).contains(&position.progress));
            assert!(position.lat() >= lo_lat - 1e-12 && position.lat() <= hi_lat + 1e-12);
            assert!(position.lon() >= lo_lon - 1e-12 && position.lon() <= hi_lon + 1e-12);
            assert_eq!(position.next_stop_id, to.stop_id);
        }
    }
}

#[test]
fn schedule_is_shared_across_threads() {
    let schedule = Arc::new(Schedule::initialize(catalog::milan()).unwrap());
    let now = wednesday(8, 0);
    let expected = snapshot(&schedule, now).len();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schedule = Arc::clone(&schedule);
            thread::spawn(move || snapshot(&schedule, now).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn nearby_stops_around_duomo() {
    let schedule = Schedule::initialize(catalog::milan()).unwrap();
    let duomo = geo::Point::new(9.1900, 45.4642);

    let nearby = schedule.stops_near(duomo, 500.0);
    assert_eq!(nearby[0].stop.id.as_str(), "stop_duomo");
    assert!(nearby[0].stop.route_ids.len() > 5);
    assert!(nearby.iter().any(|n| n.stop.id.as_str() == "stop_cordusio"));
    assert!(nearby.iter().all(|n| n.stop.id.as_str() != "stop_greco"));
}
