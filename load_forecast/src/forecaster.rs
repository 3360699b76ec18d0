//! Point forecasts over a horizon

use crate::error::Result;
use crate::features::FeatureTable;
use crate::model::TrainedModel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Prediction for a single horizon timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub forecast: f64,
}

/// Horizon timestamps mapped to predicted load, in horizon order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
}

impl ForecastResult {
    /// Get the forecast points
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Iterate over the forecast points
    pub fn iter(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter()
    }

    /// Get the forecast timestamps
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    /// Get the forecasted values
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.forecast).collect()
    }

    /// Get the number of forecast steps
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<ForecastPoint> for ForecastResult {
    fn from_iter<I: IntoIterator<Item = ForecastPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Apply a trained model to horizon features
pub fn forecast(model: &TrainedModel, horizon: &FeatureTable) -> Result<ForecastResult> {
    let values = model.predict(horizon)?;
    Ok(horizon
        .timestamps()
        .iter()
        .zip(values)
        .map(|(&timestamp, forecast)| ForecastPoint {
            timestamp,
            forecast,
        })
        .collect())
}
