//! Future timestamp index for forecasting

use crate::error::{ForecastError, Result};
use crate::features::{derive_index, FeatureTable};
use chrono::{Duration, NaiveDateTime};

/// Default horizon: one week of hourly steps
pub const DEFAULT_HORIZON_HOURS: usize = 24 * 7;

/// Contiguous future timestamps following the last observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastHorizon {
    timestamps: Vec<NaiveDateTime>,
    step: Duration,
}

impl ForecastHorizon {
    /// `length` timestamps spaced by `step`, starting at `last + step`
    pub fn after(last: NaiveDateTime, step: Duration, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(ForecastError::Configuration(
                "horizon length must be positive".to_string(),
            ));
        }
        if step <= Duration::zero() {
            return Err(ForecastError::Configuration(format!(
                "horizon step must be positive, got {} seconds",
                step.num_seconds()
            )));
        }

        let mut timestamps = Vec::with_capacity(length);
        let mut current = last;
        for _ in 0..length {
            current = current.checked_add_signed(step).ok_or_else(|| {
                ForecastError::Configuration(format!(
                    "horizon of {} steps after {} overflows the calendar",
                    length, last
                ))
            })?;
            timestamps.push(current);
        }

        Ok(Self { timestamps, step })
    }

    /// Hourly horizon of `length` steps after `last`
    pub fn hourly(last: NaiveDateTime, length: usize) -> Result<Self> {
        Self::after(last, Duration::hours(1), length)
    }

    /// Get the horizon timestamps
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Spacing between consecutive timestamps
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// A horizon always holds at least one step
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Calendar features for the horizon, derived exactly as for training rows
    pub fn features(&self) -> FeatureTable {
        derive_index(&self.timestamps)
    }
}
