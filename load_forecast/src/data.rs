//! Time series data handling for load forecasting

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDateTime};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Timestamp layouts accepted when parsing raw series
pub const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Univariate series of observations with strictly increasing timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

/// A run of missing steps between two consecutive observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// Last observation before the gap
    pub after: NaiveDateTime,
    /// First observation after the gap
    pub before: NaiveDateTime,
    /// Number of expected steps absent between them
    pub missing_steps: i64,
}

impl TimeSeries {
    /// Create a series, rejecting unordered timestamps and non-finite values
    pub fn new(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DataQuality(format!(
                "{} timestamps but {} values",
                timestamps.len(),
                values.len()
            )));
        }

        for pair in timestamps.windows(2) {
            if pair[1] == pair[0] {
                return Err(ForecastError::DataQuality(format!(
                    "duplicate timestamp {}",
                    pair[0]
                )));
            }
            if pair[1] < pair[0] {
                return Err(ForecastError::DataQuality(format!(
                    "timestamps are not increasing: {} follows {}",
                    pair[1], pair[0]
                )));
            }
        }

        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::DataQuality(format!(
                "non-finite value at {}",
                timestamps[i]
            )));
        }

        Ok(Self { timestamps, values })
    }

    /// Create a series from `(timestamp, value)` pairs
    pub fn from_pairs(pairs: Vec<(NaiveDateTime, f64)>) -> Result<Self> {
        let (timestamps, values) = pairs.into_iter().unzip();
        Self::new(timestamps, values)
    }

    /// Get the timestamps
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Get the observed values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(timestamp, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// First observed timestamp
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    /// Last observed timestamp
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }

    /// The last `n` observations (or all of them when shorter)
    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        Self {
            timestamps: self.timestamps[start..].to_vec(),
            values: self.values[start..].to_vec(),
        }
    }

    /// Spacings between consecutive observations wider than `step`
    pub fn gaps(&self, step: Duration) -> Vec<Gap> {
        let step_secs = step.num_seconds().max(1);
        self.timestamps
            .windows(2)
            .filter_map(|pair| {
                let spacing = (pair[1] - pair[0]).num_seconds();
                if spacing > step_secs {
                    Some(Gap {
                        after: pair[0],
                        before: pair[1],
                        missing_steps: (spacing + step_secs - 1) / step_secs - 1,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Reject the series when any spacing exceeds `max_gap`
    pub fn check_cadence(&self, max_gap: Duration) -> Result<()> {
        for pair in self.timestamps.windows(2) {
            let spacing = pair[1] - pair[0];
            if spacing > max_gap {
                return Err(ForecastError::DataQuality(format!(
                    "gap of {} hours between {} and {} exceeds the allowed {} hours",
                    spacing.num_hours(),
                    pair[0],
                    pair[1],
                    max_gap.num_hours()
                )));
            }
        }
        Ok(())
    }
}

/// Parse a timestamp in one of the accepted layouts
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| ForecastError::DataError(format!("Unparseable timestamp: '{}'", raw)))
}

/// Data loader for raw load series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a CSV file with a timestamp and a value column
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        time_column: &str,
        value_column: &str,
    ) -> Result<TimeSeries> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "Loaded raw series");
        Self::from_dataframe(&df, time_column, value_column)
    }

    /// Build a series from two columns of an existing DataFrame
    pub fn from_dataframe(
        df: &DataFrame,
        time_column: &str,
        value_column: &str,
    ) -> Result<TimeSeries> {
        let times = df.column(time_column).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", time_column, e))
        })?;
        let values = df.column(value_column).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", value_column, e))
        })?;

        let times = times.cast(&DataType::Utf8)?;
        let timestamps = times
            .utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, raw)| match raw {
                Some(raw) => parse_timestamp(raw),
                None => Err(ForecastError::DataQuality(format!(
                    "missing timestamp in row {}",
                    row
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        let values = values.cast(&DataType::Float64)?;
        let values = values
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.ok_or_else(|| {
                    ForecastError::DataQuality(format!(
                        "missing value in column '{}' at row {}",
                        value_column, row
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            time_column,
            value_column,
            rows = timestamps.len(),
            "Parsed series columns"
        );
        TimeSeries::new(timestamps, values)
    }
}
