//! Synthetic hourly load with known seasonality
//!
//! Values are `base + daily(hour) + weekly[day_of_week] + noise`, which gives
//! tests and demos a ground truth the calendar features can recover.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Additive offsets by day of week, Monday first
pub const DEFAULT_WEEKLY_OFFSETS: [f64; 7] = [4.0, 6.0, 6.0, 5.0, 2.0, -10.0, -13.0];

/// Generator for an hourly series with daily and weekly cycles
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticLoad {
    /// First timestamp
    pub start: NaiveDateTime,
    /// Number of hourly observations
    pub hours: usize,
    /// Level around which the load oscillates
    pub base: f64,
    /// Amplitude of the daily sinusoid
    pub daily_amplitude: f64,
    /// Offsets added per day of week
    pub weekly_offsets: [f64; 7],
    /// Standard deviation of the Gaussian noise
    pub noise_std: f64,
    /// Noise seed
    pub seed: u64,
}

impl SyntheticLoad {
    /// Two years of hourly load starting at `start`
    pub fn two_years(start: NaiveDateTime) -> Self {
        Self {
            start,
            hours: 2 * 365 * 24,
            base: 100.0,
            daily_amplitude: 20.0,
            weekly_offsets: DEFAULT_WEEKLY_OFFSETS,
            noise_std: 1.0,
            seed: 42,
        }
    }

    /// Noise-free value at a timestamp
    pub fn seasonal_value(&self, timestamp: &NaiveDateTime) -> f64 {
        let hour = f64::from(timestamp.hour());
        let dow = timestamp.weekday().num_days_from_monday() as usize;
        self.base
            + self.daily_amplitude * (2.0 * PI * (hour - 9.0) / 24.0).sin()
            + self.weekly_offsets[dow]
    }

    /// Generate the noisy series
    pub fn generate(&self) -> Result<TimeSeries> {
        if !(self.noise_std >= 0.0 && self.noise_std.is_finite()) {
            return Err(ForecastError::Configuration(format!(
                "noise_std must be finite and non-negative, got {}",
                self.noise_std
            )));
        }
        let noise = Normal::new(0.0, self.noise_std).map_err(|e| {
            ForecastError::Configuration(format!("invalid noise_std {}: {}", self.noise_std, e))
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut timestamps = Vec::with_capacity(self.hours);
        let mut values = Vec::with_capacity(self.hours);
        let mut current = self.start;
        for _ in 0..self.hours {
            values.push(self.seasonal_value(&current) + noise.sample(&mut rng));
            timestamps.push(current);
            current += Duration::hours(1);
        }

        TimeSeries::new(timestamps, values)
    }
}
