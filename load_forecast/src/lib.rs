//! # Load Forecast
//!
//! Hourly electrical load forecasting from a univariate history.
//!
//! ## Features
//!
//! - Calendar feature derivation (hour, day of week, quarter, month, day of year, year)
//! - Chronological train/holdout split at a fixed calendar boundary
//! - Gradient-boosted regression trees with holdout early stopping
//! - Holdout RMSE evaluation
//! - Hourly forecast horizon generation and point forecasts
//! - CSV loading, JSON model persistence and CSV forecast output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use load_forecast::config::ForecastConfig;
//! use load_forecast::data::DataLoader;
//! use load_forecast::pipeline;
//!
//! let series = DataLoader::from_csv("PJME_hourly.csv", "Datetime", "PJME_MW")?;
//! let output = pipeline::run(&series, &ForecastConfig::default())?;
//!
//! println!("Holdout RMSE: {:.2}", output.evaluation.rmse());
//! for point in output.forecast.iter().take(3) {
//!     println!("{} -> {:.1}", point.timestamp, point.forecast);
//! }
//! # Ok::<(), load_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod forecaster;
pub mod horizon;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod report;
pub mod split;
pub mod synthetic;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, PipelineConfig};
pub use crate::data::{DataLoader, TimeSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::evaluate::{rmse, HoldoutEvaluation};
pub use crate::features::{derive_features, derive_index, CalendarFeatures, FeatureTable};
pub use crate::forecaster::{forecast, ForecastPoint, ForecastResult};
pub use crate::horizon::{ForecastHorizon, DEFAULT_HORIZON_HOURS};
pub use crate::model::{BoostConfig, GradientBoostedModel, TrainedModel};
pub use crate::pipeline::{PipelineOutput, PipelineStage};
pub use crate::split::{split_at, SplitBoundary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
