use boost_math::BoostError;
use load_forecast::pipeline::PipelineStage;
use load_forecast::ForecastError;
use pretty_assertions::assert_eq;

#[test]
fn test_error_messages() {
    assert_eq!(
        ForecastError::Configuration("horizon length must be positive".to_string()).to_string(),
        "Configuration error: horizon length must be positive"
    );
    assert_eq!(
        ForecastError::UntrainedModel.to_string(),
        "Model has not been trained; call fit before predict"
    );
    assert_eq!(
        ForecastError::DimensionMismatch {
            expected: "3 predictions".to_string(),
            actual: "2 predictions".to_string(),
        }
        .to_string(),
        "Dimension mismatch: expected 3 predictions, got 2 predictions"
    );
}

#[test]
fn test_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(ForecastError::from(io), ForecastError::IoError(_)));

    let boost = BoostError::InvalidInput("row 3 has 5 features, expected 6".to_string());
    assert!(matches!(ForecastError::from(boost), ForecastError::Model(_)));

    let json = serde_json::from_str::<u32>("not json").unwrap_err();
    assert!(matches!(
        ForecastError::from(json),
        ForecastError::SerializationError(_)
    ));
}

#[test]
fn test_stage_context() {
    let err = ForecastError::UntrainedModel.in_stage(PipelineStage::Forecast);

    assert_eq!(err.stage(), Some(PipelineStage::Forecast));
    assert!(matches!(err.root(), ForecastError::UntrainedModel));
    assert_eq!(
        err.to_string(),
        "forecast stage failed: Model has not been trained; call fit before predict"
    );

    // Re-wrapping keeps the innermost stage
    let rewrapped = err.in_stage(PipelineStage::Persist);
    assert_eq!(rewrapped.stage(), Some(PipelineStage::Forecast));

    assert_eq!(ForecastError::UntrainedModel.stage(), None);
}

#[test]
fn test_stage_names() {
    let names: Vec<String> = [
        PipelineStage::Load,
        PipelineStage::Validate,
        PipelineStage::Split,
        PipelineStage::Fit,
        PipelineStage::Evaluate,
        PipelineStage::Horizon,
        PipelineStage::Forecast,
        PipelineStage::Persist,
    ]
    .iter()
    .map(|stage| stage.to_string())
    .collect();

    assert_eq!(
        names,
        ["load", "validate", "split", "fit", "evaluate", "horizon", "forecast", "persist"]
    );
}
