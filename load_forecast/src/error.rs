//! Error types for the load_forecast crate

use crate::pipeline::PipelineStage;
use boost_math::BoostError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the load_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Invalid split boundary, horizon length, hyperparameters or config file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prediction requested from a model that was never fitted
    #[error("Model has not been trained; call fit before predict")]
    UntrainedModel,

    /// Parallel sequences differ in length or are empty
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Duplicate, unordered, missing or non-finite observations
    #[error("Data quality error: {0}")]
    DataQuality(String),

    /// Error related to data layout (missing columns, unparseable values)
    #[error("Data error: {0}")]
    DataError(String),

    /// Error raised by the boosted ensemble
    #[error("Model error: {0}")]
    Model(#[from] BoostError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from CSV writing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A pipeline stage failed
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: PipelineStage,
        source: Box<ForecastError>,
    },
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// Attach the pipeline stage in which this error occurred
    pub fn in_stage(self, stage: PipelineStage) -> Self {
        match self {
            // Keep the innermost stage
            err @ ForecastError::Stage { .. } => err,
            err => ForecastError::Stage {
                stage,
                source: Box::new(err),
            },
        }
    }

    /// The stage a pipeline error was raised in, if any
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            ForecastError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error, unwrapping any stage context
    pub fn root(&self) -> &ForecastError {
        match self {
            ForecastError::Stage { source, .. } => source.root(),
            err => err,
        }
    }
}

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}
