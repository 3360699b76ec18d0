//! Chronological train/holdout split

use crate::error::{ForecastError, Result};
use crate::features::FeatureTable;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar cutoff: rows strictly before it train, rows at or after it validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SplitBoundary(NaiveDateTime);

impl SplitBoundary {
    /// Boundary at an exact timestamp
    pub fn new(cutoff: NaiveDateTime) -> Self {
        Self(cutoff)
    }

    /// Boundary at midnight of a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::default()))
    }

    /// The cutoff timestamp
    pub fn cutoff(&self) -> NaiveDateTime {
        self.0
    }

    /// Whether a timestamp belongs to the training window
    pub fn is_training(&self, timestamp: &NaiveDateTime) -> bool {
        *timestamp < self.0
    }
}

impl fmt::Display for SplitBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partition a feature table into `(train, holdout)` at the boundary.
///
/// Temporal order is the partition key; rows are never shuffled. A split
/// that leaves either side empty is rejected.
pub fn split_at(table: &FeatureTable, boundary: SplitBoundary) -> Result<(FeatureTable, FeatureTable)> {
    let (train_idx, holdout_idx): (Vec<usize>, Vec<usize>) =
        (0..table.len()).partition(|&i| boundary.is_training(&table.timestamps()[i]));

    if train_idx.is_empty() {
        return Err(ForecastError::Configuration(format!(
            "split boundary {} leaves the training window empty (first timestamp {})",
            boundary,
            describe(table.timestamps().first())
        )));
    }
    if holdout_idx.is_empty() {
        return Err(ForecastError::Configuration(format!(
            "split boundary {} leaves the holdout window empty (last timestamp {})",
            boundary,
            describe(table.timestamps().last())
        )));
    }

    Ok((table.select(&train_idx), table.select(&holdout_idx)))
}

fn describe(timestamp: Option<&NaiveDateTime>) -> String {
    timestamp.map_or_else(|| "none".to_string(), |t| t.to_string())
}
