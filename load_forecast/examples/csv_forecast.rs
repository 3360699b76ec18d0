//! Run the full batch job from a JSON configuration file.
//!
//! ```text
//! cargo run --example csv_forecast -- config.json
//! ```
//!
//! Without an argument the default configuration is used, which reads
//! `data/raw/PJME_hourly.csv`.

use load_forecast::config::PipelineConfig;
use load_forecast::pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "load_forecast=info".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    println!("Load Forecast: CSV Example");
    println!("==========================\n");
    println!("Input:      {}", config.input.path.display());
    println!("Split date: {}", config.forecast.split_date);
    println!("Horizon:    {} hours\n", config.forecast.horizon_hours);

    let output = pipeline::run_from_config(&config)?;

    println!("{}", output.evaluation);
    println!("{}", output.report);

    if let Some(path) = &config.output.model_path {
        println!("Model written to {}", path.display());
    }
    if let Some(path) = &config.output.forecast_path {
        println!("Forecast written to {}", path.display());
    }

    Ok(())
}
