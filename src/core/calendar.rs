//! Simulation clock for time-of-day tracking
//!
//! Simulated time is measured in sim-minutes and advanced from real frame
//! deltas scaled by the simulation speed. A speed of zero pauses the clock.

use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Weather changes every three sim-hours
const WEATHER_INTERVAL_MINUTES: f64 = 3.0 * 60.0;

const WEATHER_CYCLE: [Weather; 8] = [
    Weather::Sunny,
    Weather::Sunny,
    Weather::Rainy,
    Weather::Sunny,
    Weather::Snowy,
    Weather::Rainy,
    Weather::Sunny,
    Weather::Sunny,
];

/// Time of day periods used for routine bias and task presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePeriod {
    Morning,    // 06:00-12:00
    Afternoon,  // 12:00-18:00
    Evening,    // 18:00-22:00
    Night,      // 22:00-06:00
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night, // 22-23, 0-5
        }
    }

    pub fn from_minutes(sim_minutes: f64) -> Self {
        Self::from_hour((wrap_minutes(sim_minutes) / 60.0).floor() as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
    Sunny,
    Rainy,
    Snowy,
}

impl Weather {
    pub fn at(sim_minutes: f64) -> Self {
        let idx = (sim_minutes.max(0.0) / WEATHER_INTERVAL_MINUTES).floor() as usize;
        WEATHER_CYCLE[idx % WEATHER_CYCLE.len()]
    }
}

fn wrap_minutes(total: f64) -> f64 {
    total.rem_euclid(MINUTES_PER_DAY)
}

/// Monotonic simulated clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    sim_minutes: f64,
    speed: f32,
    minutes_per_second: f32,
}

impl SimClock {
    pub fn new(start_minutes: f64, minutes_per_second: f32) -> Self {
        Self {
            sim_minutes: start_minutes.max(0.0),
            speed: 1.0,
            minutes_per_second: minutes_per_second.max(0.0),
        }
    }

    /// Advance by a real frame delta; returns the elapsed sim-minutes
    pub fn advance(&mut self, real_seconds: f32) -> f64 {
        let elapsed = (real_seconds.max(0.0) * self.speed * self.minutes_per_second) as f64;
        self.sim_minutes += elapsed;
        elapsed
    }

    /// Jump forward by a number of sim-minutes regardless of speed
    pub fn advance_minutes(&mut self, minutes: f64) {
        self.sim_minutes += minutes.max(0.0);
    }

    pub fn now(&self) -> f64 {
        self.sim_minutes
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.speed <= 0.0
    }

    /// 1-based day counter
    pub fn day(&self) -> u32 {
        (self.sim_minutes / MINUTES_PER_DAY).floor() as u32 + 1
    }

    pub fn hour(&self) -> u32 {
        (wrap_minutes(self.sim_minutes) / 60.0).floor() as u32
    }

    /// Minutes since midnight of the current day
    pub fn minute_of_day(&self) -> f64 {
        wrap_minutes(self.sim_minutes)
    }

    pub fn period(&self) -> TimePeriod {
        TimePeriod::from_minutes(self.sim_minutes)
    }

    pub fn weather(&self) -> Weather {
        Weather::at(self.sim_minutes)
    }

    /// `HH:MM` wall-clock text
    pub fn clock_text(&self) -> String {
        let wrapped = wrap_minutes(self.sim_minutes);
        let hours = (wrapped / 60.0).floor() as u32;
        let minutes = (wrapped % 60.0).floor() as u32;
        format!("{:02}:{:02}", hours, minutes)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(7.0 * 60.0, 1.0)
    }
}
