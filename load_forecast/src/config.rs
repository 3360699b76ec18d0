//! Pipeline configuration
//!
//! All settings are plain serde structs with defaults matching the weekly
//! hourly forecast: split on 2015-01-01, forecast 168 hours, boosted trees
//! with a 0.01 learning rate and 20 rounds of early-stopping patience.

use crate::error::{ForecastError, Result};
use crate::horizon::DEFAULT_HORIZON_HOURS;
use crate::model::BoostConfig;
use crate::split::SplitBoundary;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Settings of the in-memory forecasting core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Rows before this timestamp train, rows at or after it validate
    pub split_date: NaiveDateTime,
    /// Number of hourly steps to forecast
    pub horizon_hours: usize,
    /// Boosted ensemble hyperparameters
    pub model: BoostConfig,
    /// Reject series with spacings wider than this many hours; gaps are only
    /// logged when unset
    pub max_gap_hours: Option<u32>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            split_date: NaiveDate::from_ymd_opt(2015, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or(NaiveDateTime::MIN),
            horizon_hours: DEFAULT_HORIZON_HOURS,
            model: BoostConfig::default(),
            max_gap_hours: None,
        }
    }
}

impl ForecastConfig {
    /// The chronological split boundary
    pub fn split_boundary(&self) -> SplitBoundary {
        SplitBoundary::new(self.split_date)
    }

    /// Maximum spacing tolerated between observations, if enforced
    pub fn max_gap(&self) -> Option<Duration> {
        self.max_gap_hours.map(|h| Duration::hours(i64::from(h)))
    }

    /// Check the core settings
    pub fn validate(&self) -> Result<()> {
        if self.horizon_hours == 0 {
            return Err(ForecastError::Configuration(
                "horizon_hours must be positive".to_string(),
            ));
        }
        if self.max_gap_hours == Some(0) {
            return Err(ForecastError::Configuration(
                "max_gap_hours must be positive when set".to_string(),
            ));
        }
        self.model
            .validate()
            .map_err(|e| ForecastError::Configuration(e.to_string()))
    }
}

/// Location and layout of the raw series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// CSV file holding the series
    pub path: PathBuf,
    /// Name of the timestamp column
    pub time_column: String,
    /// Name of the load column
    pub value_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/raw/PJME_hourly.csv"),
            time_column: "Datetime".to_string(),
            value_column: "PJME_MW".to_string(),
        }
    }
}

/// Where fitted artifacts are written; unset paths are skipped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON file for the trained model
    pub model_path: Option<PathBuf>,
    /// CSV file for the forecast
    pub forecast_path: Option<PathBuf>,
}

/// Full batch job configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub forecast: ForecastConfig,
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ForecastError::Configuration(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(ForecastError::Configuration(
                "input path must not be empty".to_string(),
            ));
        }
        if self.input.time_column.is_empty() || self.input.value_column.is_empty() {
            return Err(ForecastError::Configuration(
                "input column names must not be empty".to_string(),
            ));
        }
        self.forecast.validate()
    }
}
