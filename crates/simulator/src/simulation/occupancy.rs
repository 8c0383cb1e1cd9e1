//! Time-of-day crowding heuristic.
//!
//! This is a presentation aid, not a measurement: each call draws a level from a
//! distribution that depends only on which band of the day `now` falls in.

use rand::Rng;

use crate::models::ServiceTime;

/// Coarse crowd-density classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OccupancyLevel {
    Empty,
    ManySeats,
    FewSeats,
    Standing,
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupancyBand {
    /// 07:30 to 09:30
    MorningPeak,
    /// 17:30 to 19:30
    EveningPeak,
    /// 06:00 to 22:00 outside the peaks
    Daytime,
    Night,
}

const MORNING_PEAK: (f64, f64) = (450.0, 570.0);
const EVENING_PEAK: (f64, f64) = (1050.0, 1170.0);
const DAYTIME: (f64, f64) = (360.0, 1320.0);

const DAYTIME_LEVELS: [OccupancyLevel; 3] = [
    OccupancyLevel::ManySeats,
    OccupancyLevel::FewSeats,
    OccupancyLevel::Standing,
];

impl OccupancyBand {
    /// Band boundaries are inclusive on both ends.
    pub fn at(now: ServiceTime) -> Self {
        let within = |(start, end): (f64, f64)| (start..=end).contains(&now.minutes());

        if within(MORNING_PEAK) {
            Self::MorningPeak
        } else if within(EVENING_PEAK) {
            Self::EveningPeak
        } else if within(DAYTIME) {
            Self::Daytime
        } else {
            Self::Night
        }
    }
}

/// Draw an occupancy level for a vehicle observed at `now`.
///
/// | band          | distribution                               |
/// |---------------|--------------------------------------------|
/// | morning peak  | 70% `FULL`, 30% `STANDING`                 |
/// | evening peak  | 70% `STANDING`, 30% `FEW_SEATS`            |
/// | daytime       | uniform over `MANY_SEATS`, `FEW_SEATS`, `STANDING` |
/// | night         | 50% `MANY_SEATS`, 50% `EMPTY`              |
pub fn estimate_occupancy<R: Rng + ?Sized>(now: ServiceTime, rng: &mut R) -> OccupancyLevel {
    match OccupancyBand::at(now) {
        OccupancyBand::MorningPeak => {
            if rng.random_bool(0.7) {
                OccupancyLevel::Full
            } else {
                OccupancyLevel::Standing
            }
        }
        OccupancyBand::EveningPeak => {
            if rng.random_bool(0.7) {
                OccupancyLevel::Standing
            } else {
                OccupancyLevel::FewSeats
            }
        }
        OccupancyBand::Daytime => DAYTIME_LEVELS[rng.random_range(0..DAYTIME_LEVELS.len())],
        OccupancyBand::Night => {
            if rng.random_bool(0.5) {
                OccupancyLevel::ManySeats
            } else {
                OccupancyLevel::Empty
            }
        }
    }
}
