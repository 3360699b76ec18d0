//! Model and forecast persistence

use crate::error::Result;
use crate::forecaster::ForecastResult;
use crate::model::TrainedModel;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Timestamp layout used in written forecasts
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header of the forecast CSV
pub const FORECAST_HEADER: [&str; 2] = ["Datetime", "forecast"];

/// Save a trained model as JSON
pub fn save_model<P: AsRef<Path>>(path: P, model: &TrainedModel) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, model)?;
    info!(path = %path.display(), trees = model.n_trees(), "Model saved");
    Ok(())
}

/// Load a model written by [`save_model`]
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<TrainedModel> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write the forecast as a two-column `Datetime,forecast` CSV
pub fn write_forecast_csv<P: AsRef<Path>>(path: P, forecast: &ForecastResult) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(FORECAST_HEADER)?;
    for point in forecast.iter() {
        writer.write_record([
            point.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string(),
            point.forecast.to_string(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = forecast.len(), "Forecast saved");
    Ok(())
}
