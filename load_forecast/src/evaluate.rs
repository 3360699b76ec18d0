//! Holdout evaluation

use crate::error::{ForecastError, Result};
use crate::features::FeatureTable;
use chrono::NaiveDateTime;
use std::fmt;

/// Root-mean-squared error between parallel sequences
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: format!("{} predictions", actual.len()),
            actual: format!("{} predictions", predicted.len()),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::DimensionMismatch {
            expected: "non-zero length".to_string(),
            actual: "empty sequences".to_string(),
        });
    }

    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    Ok(mse.sqrt())
}

/// Holdout timestamps paired with actual and predicted values
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutEvaluation {
    timestamps: Vec<NaiveDateTime>,
    actual: Vec<f64>,
    predicted: Vec<f64>,
    rmse: f64,
}

impl HoldoutEvaluation {
    /// Pair holdout rows with their predictions and score them
    pub fn new(holdout: &FeatureTable, predicted: Vec<f64>) -> Result<Self> {
        let actual = holdout.require_target()?.to_vec();
        let rmse = rmse(&actual, &predicted)?;

        Ok(Self {
            timestamps: holdout.timestamps().to_vec(),
            actual,
            predicted,
            rmse,
        })
    }

    /// Get the holdout timestamps
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Get the observed holdout values
    pub fn actual(&self) -> &[f64] {
        &self.actual
    }

    /// Get the model predictions
    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    /// Root-mean-squared error over the holdout window
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Get the number of holdout rows
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the evaluation is empty
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

impl fmt::Display for HoldoutEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Holdout Evaluation:")?;
        if let (Some(first), Some(last)) = (self.timestamps.first(), self.timestamps.last()) {
            writeln!(f, "  Window: {} .. {}", first, last)?;
        }
        writeln!(f, "  Rows:   {}", self.len())?;
        writeln!(f, "  RMSE:   {:.2}", self.rmse)?;
        Ok(())
    }
}
