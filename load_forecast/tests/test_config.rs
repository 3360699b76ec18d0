use chrono::NaiveDate;
use load_forecast::config::{ForecastConfig, InputConfig, PipelineConfig};
use load_forecast::model::BoostConfig;
use load_forecast::ForecastError;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = PipelineConfig::default();

    assert_eq!(
        config.forecast.split_date,
        NaiveDate::from_ymd_opt(2015, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
    assert_eq!(config.forecast.horizon_hours, 168);
    assert_eq!(config.forecast.max_gap_hours, None);
    assert_eq!(config.forecast.model, BoostConfig::default());
    assert_eq!(config.input.path, PathBuf::from("data/raw/PJME_hourly.csv"));
    assert_eq!(config.input.time_column, "Datetime");
    assert_eq!(config.input.value_column, "PJME_MW");
    assert_eq!(config.output.model_path, None);
    assert_eq!(config.output.forecast_path, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "input": { "path": "data/raw/AEP_hourly.csv", "value_column": "AEP_MW" },
            "forecast": {
                "split_date": "2016-06-01T00:00:00",
                "model": { "learning_rate": 0.05, "seed": 7 }
            }
        }"#,
    )
    .unwrap();

    let config = PipelineConfig::from_json_file(&path).unwrap();

    assert_eq!(config.input.path, PathBuf::from("data/raw/AEP_hourly.csv"));
    assert_eq!(config.input.time_column, "Datetime");
    assert_eq!(config.input.value_column, "AEP_MW");
    assert_eq!(
        config.forecast.split_date,
        NaiveDate::from_ymd_opt(2016, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
    assert_eq!(config.forecast.horizon_hours, 168);
    assert_eq!(
        config.forecast.model,
        BoostConfig {
            learning_rate: 0.05,
            seed: Some(7),
            ..BoostConfig::default()
        }
    );
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "forecast": { "model": { "subsample": 0.0 } } }"#).unwrap();

    assert!(matches!(
        PipelineConfig::from_json_file(&path),
        Err(ForecastError::Configuration(_))
    ));
}

#[test]
fn test_malformed_json_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ \"forecast\": ").unwrap();

    assert!(matches!(
        PipelineConfig::from_json_file(&path),
        Err(ForecastError::Configuration(_))
    ));
}

#[test]
fn test_forecast_config_validation() {
    let zero_horizon = ForecastConfig {
        horizon_hours: 0,
        ..ForecastConfig::default()
    };
    assert!(matches!(
        zero_horizon.validate(),
        Err(ForecastError::Configuration(_))
    ));

    let zero_gap = ForecastConfig {
        max_gap_hours: Some(0),
        ..ForecastConfig::default()
    };
    assert!(matches!(
        zero_gap.validate(),
        Err(ForecastError::Configuration(_))
    ));

    let limited = ForecastConfig {
        max_gap_hours: Some(3),
        ..ForecastConfig::default()
    };
    assert_eq!(limited.max_gap(), Some(chrono::Duration::hours(3)));
    assert_eq!(limited.split_boundary().cutoff(), limited.split_date);
}

#[test]
fn test_empty_input_columns_are_rejected() {
    let config = PipelineConfig {
        input: InputConfig {
            value_column: String::new(),
            ..InputConfig::default()
        },
        ..PipelineConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ForecastError::Configuration(_))
    ));
}
