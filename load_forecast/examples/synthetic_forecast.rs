use chrono::NaiveDate;
use load_forecast::config::ForecastConfig;
use load_forecast::model::BoostConfig;
use load_forecast::pipeline;
use load_forecast::synthetic::SyntheticLoad;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "load_forecast=info,boost_math=info".into()),
        )
        .init();

    println!("Load Forecast: Synthetic Series Example");
    println!("=======================================\n");

    // Two years of hourly load with a daily and a weekly cycle
    let start = NaiveDate::from_ymd_opt(2016, 1, 4)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;
    let generator = SyntheticLoad::two_years(start);
    let series = generator.generate()?;
    println!(
        "Generated {} hourly observations ({} .. {})\n",
        series.len(),
        start,
        series.last_timestamp().ok_or("empty series")?
    );

    // Hold out the final month
    let split_date = NaiveDate::from_ymd_opt(2017, 12, 4)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid split date")?;
    let config = ForecastConfig {
        split_date,
        model: BoostConfig {
            n_estimators: 400,
            learning_rate: 0.1,
            ..BoostConfig::default()
        },
        ..ForecastConfig::default()
    };

    println!("Fitting gradient-boosted trees...");
    let output = pipeline::run(&series, &config)?;
    println!(
        "Kept {} trees (best round {:?})\n",
        output.model.n_trees(),
        output.model.best_iteration()
    );

    println!("{}", output.evaluation);
    println!("{}", output.report);

    println!("First forecast hours vs. noise-free load:");
    for point in output.forecast.iter().take(6) {
        println!(
            "  {}  forecast {:>7.2}  expected {:>7.2}",
            point.timestamp,
            point.forecast,
            generator.seasonal_value(&point.timestamp)
        );
    }

    Ok(())
}
