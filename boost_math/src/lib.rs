//! # Boost Math
//!
//! Gradient-boosted regression trees over dense numeric feature rows.
//! This crate knows nothing about time or calendars: it bins feature
//! columns once, grows depth-limited trees on squared-error gradients and
//! stops early when a held-out evaluation set stops improving.

use thiserror::Error;

pub mod binning;
pub mod booster;
pub mod config;
pub mod tree;

pub use crate::binning::{BinnedMatrix, FeatureBins};
pub use crate::booster::{Ensemble, EvalSet, GradientBooster};
pub use crate::config::BoostConfig;
pub use crate::tree::RegressionTree;

/// Errors that can occur while fitting or applying a boosted ensemble
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoostError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data for training: {0}")]
    InsufficientData(String),
}

/// Result type for boosting operations
pub type Result<T> = std::result::Result<T, BoostError>;

/// Check that every row has `width` finite columns.
pub(crate) fn validate_rows(rows: &[Vec<f64>], width: usize) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(BoostError::InvalidInput(format!(
                "row {} has {} features, expected {}",
                i,
                row.len(),
                width
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(BoostError::InvalidInput(format!(
                "row {} contains a non-finite feature value",
                i
            )));
        }
    }
    Ok(())
}
