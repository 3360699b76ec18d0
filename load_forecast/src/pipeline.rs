//! End-to-end forecasting run
//!
//! Stages execute strictly in sequence; each consumes the previous stage's
//! output and produces a new value. The first failure aborts the run with a
//! [`ForecastError::Stage`] naming where it happened.

use crate::config::{ForecastConfig, PipelineConfig};
use crate::data::{DataLoader, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::evaluate::HoldoutEvaluation;
use crate::features::derive_features;
use crate::forecaster::{forecast, ForecastResult};
use crate::horizon::ForecastHorizon;
use crate::model::{GradientBoostedModel, TrainedModel};
use crate::persist::{save_model, write_forecast_csv};
use crate::report::ForecastReport;
use crate::split::split_at;
use chrono::Duration;
use std::fmt;
use tracing::{error, info, warn};

/// Stages of a forecasting run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Load,
    Validate,
    Split,
    Fit,
    Evaluate,
    Horizon,
    Forecast,
    Persist,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Load => "load",
            PipelineStage::Validate => "validate",
            PipelineStage::Split => "split",
            PipelineStage::Fit => "fit",
            PipelineStage::Evaluate => "evaluate",
            PipelineStage::Horizon => "horizon",
            PipelineStage::Forecast => "forecast",
            PipelineStage::Persist => "persist",
        };
        write!(f, "{}", name)
    }
}

trait StageResult<T> {
    fn in_stage(self, stage: PipelineStage) -> Result<T>;
}

impl<T> StageResult<T> for Result<T> {
    fn in_stage(self, stage: PipelineStage) -> Result<T> {
        self.map_err(|e| {
            error!(%stage, error = %e, "Pipeline stage failed");
            e.in_stage(stage)
        })
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub model: TrainedModel,
    pub evaluation: HoldoutEvaluation,
    pub forecast: ForecastResult,
    pub report: ForecastReport,
}

/// Run the forecasting core on an in-memory series
pub fn run(series: &TimeSeries, config: &ForecastConfig) -> Result<PipelineOutput> {
    validate(series, config).in_stage(PipelineStage::Validate)?;

    let table = derive_features(series);
    info!(rows = table.len(), "Calendar features derived");

    let boundary = config.split_boundary();
    let (train, holdout) = split_at(&table, boundary).in_stage(PipelineStage::Split)?;
    info!(
        %boundary,
        train_rows = train.len(),
        holdout_rows = holdout.len(),
        "Split into training and holdout windows"
    );

    let mut model = GradientBoostedModel::new(config.model.clone()).in_stage(PipelineStage::Fit)?;
    model.fit(&train, &holdout).in_stage(PipelineStage::Fit)?;
    let model = model.into_trained().in_stage(PipelineStage::Fit)?;

    let evaluation = model
        .predict(&holdout)
        .and_then(|predicted| HoldoutEvaluation::new(&holdout, predicted))
        .in_stage(PipelineStage::Evaluate)?;
    info!(rmse = evaluation.rmse(), "Holdout evaluated");

    let last = series.last_timestamp().ok_or_else(|| {
        ForecastError::DataQuality("series is empty".to_string()).in_stage(PipelineStage::Horizon)
    })?;
    let horizon =
        ForecastHorizon::hourly(last, config.horizon_hours).in_stage(PipelineStage::Horizon)?;

    let forecast = forecast(&model, &horizon.features()).in_stage(PipelineStage::Forecast)?;
    info!(steps = forecast.len(), "Forecast generated");

    let report = ForecastReport::last_week(series, &forecast);

    Ok(PipelineOutput {
        model,
        evaluation,
        forecast,
        report,
    })
}

/// Load the configured series, run the core and persist the outputs
pub fn run_from_config(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate().in_stage(PipelineStage::Validate)?;

    let input = &config.input;
    let series = DataLoader::from_csv(&input.path, &input.time_column, &input.value_column)
        .in_stage(PipelineStage::Load)?;

    let output = run(&series, &config.forecast)?;

    if let Some(path) = &config.output.model_path {
        save_model(path, &output.model).in_stage(PipelineStage::Persist)?;
    }
    if let Some(path) = &config.output.forecast_path {
        write_forecast_csv(path, &output.forecast).in_stage(PipelineStage::Persist)?;
    }

    Ok(output)
}

fn validate(series: &TimeSeries, config: &ForecastConfig) -> Result<()> {
    config.validate()?;

    if series.is_empty() {
        return Err(ForecastError::DataQuality("series is empty".to_string()));
    }

    let gaps = series.gaps(Duration::hours(1));
    if !gaps.is_empty() {
        let missing: i64 = gaps.iter().map(|g| g.missing_steps).sum();
        warn!(gaps = gaps.len(), missing_hours = missing, "Series has missing hours");
    }
    if let Some(max_gap) = config.max_gap() {
        series.check_cadence(max_gap)?;
    }

    Ok(())
}
