//! Calendar feature derivation
//!
//! Every model input is computed from a timestamp alone. Historical rows and
//! synthetic horizon rows both go through [`CalendarFeatures::from_timestamp`],
//! so the encoding seen at forecast time is identical to the one used for
//! training.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Number of calendar features per row
pub const N_FEATURES: usize = 6;

/// Column names, in model input order
pub const FEATURE_NAMES: [&str; N_FEATURES] =
    ["hour", "dayofweek", "quarter", "month", "dayofyear", "year"];

/// Calendar covariates of a single timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Day of week (0=Monday, 6=Sunday)
    pub day_of_week: u32,
    /// Calendar quarter (1-4)
    pub quarter: u32,
    /// Month (1-12)
    pub month: u32,
    /// Day of year (1-366)
    pub day_of_year: u32,
    /// Calendar year
    pub year: i32,
}

impl CalendarFeatures {
    /// Derive the features of one timestamp
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        let month = timestamp.month();
        Self {
            hour: timestamp.hour(),
            day_of_week: timestamp.weekday().num_days_from_monday(),
            quarter: (month - 1) / 3 + 1,
            month,
            day_of_year: timestamp.ordinal(),
            year: timestamp.year(),
        }
    }

    /// Numeric encoding in [`FEATURE_NAMES`] order
    pub fn to_row(&self) -> [f64; N_FEATURES] {
        [
            f64::from(self.hour),
            f64::from(self.day_of_week),
            f64::from(self.quarter),
            f64::from(self.month),
            f64::from(self.day_of_year),
            f64::from(self.year),
        ]
    }
}

/// Timestamp-indexed calendar features with an optional target column
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    timestamps: Vec<NaiveDateTime>,
    features: Vec<CalendarFeatures>,
    target: Option<Vec<f64>>,
}

impl FeatureTable {
    /// Get the timestamps
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Get the feature rows
    pub fn features(&self) -> &[CalendarFeatures] {
        &self.features
    }

    /// Get the target column, absent for horizon tables
    pub fn target(&self) -> Option<&[f64]> {
        self.target.as_deref()
    }

    /// Get the target column or fail when the table has none
    pub fn require_target(&self) -> Result<&[f64]> {
        self.target().ok_or_else(|| {
            ForecastError::DataError("feature table has no target column".to_string())
        })
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Row-major numeric feature matrix for the model
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.features.iter().map(|f| f.to_row().to_vec()).collect()
    }

    /// New table holding the rows at `indices`, in the given order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            timestamps: indices.iter().map(|&i| self.timestamps[i]).collect(),
            features: indices.iter().map(|&i| self.features[i]).collect(),
            target: self
                .target
                .as_ref()
                .map(|target| indices.iter().map(|&i| target[i]).collect()),
        }
    }
}

/// Derive calendar features for an observed series, keeping its values as target
pub fn derive_features(series: &TimeSeries) -> FeatureTable {
    let mut table = derive_index(series.timestamps());
    table.target = Some(series.values().to_vec());
    table
}

/// Derive calendar features for a bare timestamp index
pub fn derive_index(timestamps: &[NaiveDateTime]) -> FeatureTable {
    FeatureTable {
        timestamps: timestamps.to_vec(),
        features: timestamps
            .iter()
            .map(CalendarFeatures::from_timestamp)
            .collect(),
        target: None,
    }
}
