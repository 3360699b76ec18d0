//! Read-only summary of recent observations next to the forecast

use crate::data::TimeSeries;
use crate::forecaster::ForecastResult;
use crate::horizon::DEFAULT_HORIZON_HOURS;
use std::fmt;

/// Tail of the observed series alongside the forecast, for display
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    recent: TimeSeries,
    forecast: ForecastResult,
}

impl ForecastReport {
    /// Keep the last `tail_len` observations next to the forecast
    pub fn new(series: &TimeSeries, forecast: &ForecastResult, tail_len: usize) -> Self {
        Self {
            recent: series.tail(tail_len),
            forecast: forecast.clone(),
        }
    }

    /// Report with the last week of observations
    pub fn last_week(series: &TimeSeries, forecast: &ForecastResult) -> Self {
        Self::new(series, forecast, DEFAULT_HORIZON_HOURS)
    }

    /// Get the recent observations
    pub fn recent(&self) -> &TimeSeries {
        &self.recent
    }

    /// Get the forecast
    pub fn forecast(&self) -> &ForecastResult {
        &self.forecast
    }
}

struct Summary {
    min: f64,
    mean: f64,
    max: f64,
}

fn summarize(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(Summary { min, mean, max })
}

impl fmt::Display for ForecastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Load Forecast Report:")?;

        if let (Some(first), Some(last), Some(s)) = (
            self.recent.first_timestamp(),
            self.recent.last_timestamp(),
            summarize(self.recent.values()),
        ) {
            writeln!(
                f,
                "  Actual   ({} h, {} .. {}): min {:.2}  mean {:.2}  max {:.2}",
                self.recent.len(),
                first,
                last,
                s.min,
                s.mean,
                s.max
            )?;
        }

        let values = self.forecast.values();
        let timestamps = self.forecast.timestamps();
        if let (Some(first), Some(last), Some(s)) =
            (timestamps.first(), timestamps.last(), summarize(&values))
        {
            writeln!(
                f,
                "  Forecast ({} h, {} .. {}): min {:.2}  mean {:.2}  max {:.2}",
                self.forecast.len(),
                first,
                last,
                s.min,
                s.mean,
                s.max
            )?;
        }
        Ok(())
    }
}
