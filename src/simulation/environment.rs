//! # Environment Model
//!
//! Ambient temperature and solar availability as pure functions of the hour of day.
//! Deterministic: no weather, no seasons, no location.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Solar panels produce only inside [SUNRISE_HOUR, SUNSET_HOUR)
pub const SUNRISE_HOUR: u32 = 6;
pub const SUNSET_HOUR: u32 = 18;
/// Hour of peak solar output
pub const SOLAR_NOON_HOUR: u32 = 12;

/// Mean of the daily temperature curve (°C)
pub const BASE_TEMPERATURE_C: f64 = 22.5;
/// Half the daily swing (°C)
pub const TEMPERATURE_AMPLITUDE_C: f64 = 7.5;

/// Fraction (0.0-1.0) of nominal solar output available at `hour`.
///
/// Triangular profile: 0 outside daylight, rising linearly to 1.0 at noon.
pub fn solar_ratio(hour: u32) -> f64 {
    if !(SUNRISE_HOUR..SUNSET_HOUR).contains(&hour) {
        return 0.0;
    }
    let half_day = (SOLAR_NOON_HOUR - SUNRISE_HOUR) as f64;
    let from_noon = (hour as f64 - SOLAR_NOON_HOUR as f64).abs();
    (1.0 - from_noon / half_day).max(0.0)
}

/// Ambient temperature (°C) at `hour`.
///
/// `22.5 + 7.5 * sin((hour - 6) * π/12)`. The curve crosses the mean at 06:00 and
/// 18:00, peaks at 12:00 (30 °C) and bottoms out at 00:00 (15 °C).
pub fn temperature(hour: u32) -> f64 {
    let hour_angle = (hour as f64 - SUNRISE_HOUR as f64) * (PI / 12.0);
    BASE_TEMPERATURE_C + TEMPERATURE_AMPLITUDE_C * hour_angle.sin()
}

/// Environment snapshot for one point in simulated time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentState {
    pub timestamp: NaiveDateTime,
    pub hour: u32,
    pub temperature_c: f64,
    pub solar_ratio: f64,
}

impl EnvironmentState {
    pub fn at(timestamp: NaiveDateTime) -> Self {
        let hour = timestamp.hour();
        Self {
            timestamp,
            hour,
            temperature_c: temperature(hour),
            solar_ratio: solar_ratio(hour),
        }
    }

    pub fn is_daylight(&self) -> bool {
        self.solar_ratio > 0.0
    }
}
