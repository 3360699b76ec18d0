//! Gradient-boosted load model
//!
//! Wraps [`boost_math::GradientBooster`] with the calendar feature layout and
//! holdout early stopping. Fitting yields an immutable [`TrainedModel`].

use crate::error::{ForecastError, Result};
use crate::features::{FeatureTable, FEATURE_NAMES};
use boost_math::{BoostError, Ensemble, EvalSet, GradientBooster};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use boost_math::BoostConfig;

/// A fitted load model; immutable and consumed through [`TrainedModel::predict`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    feature_names: Vec<String>,
    ensemble: Ensemble,
}

impl TrainedModel {
    /// One prediction per row of the feature table
    pub fn predict(&self, features: &FeatureTable) -> Result<Vec<f64>> {
        Ok(self.ensemble.predict(&features.matrix())?)
    }

    /// Feature columns the model was trained on
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of trees kept after early stopping
    pub fn n_trees(&self) -> usize {
        self.ensemble.n_trees()
    }

    /// Zero-based boosting round with the best holdout RMSE
    pub fn best_iteration(&self) -> Option<usize> {
        self.ensemble.best_iteration()
    }

    /// Best holdout RMSE seen during fitting
    pub fn best_score(&self) -> Option<f64> {
        self.ensemble.best_score()
    }

    /// Holdout RMSE after each boosting round
    pub fn eval_history(&self) -> &[f64] {
        self.ensemble.eval_history()
    }
}

/// Gradient-boosted regressor over calendar features
#[derive(Debug, Clone)]
pub struct GradientBoostedModel {
    booster: GradientBooster,
    trained: Option<TrainedModel>,
}

impl GradientBoostedModel {
    /// Create an unfitted model after validating its hyperparameters
    pub fn new(config: BoostConfig) -> Result<Self> {
        let booster = GradientBooster::new(config).map_err(config_error)?;
        Ok(Self {
            booster,
            trained: None,
        })
    }

    /// Hyperparameters of this model
    pub fn config(&self) -> &BoostConfig {
        self.booster.config()
    }

    /// Fit on the training window, early-stopping against the holdout window
    pub fn fit(&mut self, train: &FeatureTable, holdout: &FeatureTable) -> Result<&TrainedModel> {
        let train_target = train.require_target()?;
        let holdout_target = holdout.require_target()?;
        let train_rows = train.matrix();
        let holdout_rows = holdout.matrix();

        let ensemble = self.booster.fit(
            &train_rows,
            train_target,
            Some(EvalSet {
                rows: &holdout_rows,
                targets: holdout_target,
            }),
        )?;

        info!(
            train_rows = train.len(),
            holdout_rows = holdout.len(),
            trees = ensemble.n_trees(),
            best_iteration = ?ensemble.best_iteration(),
            best_rmse = ?ensemble.best_score(),
            "Model fitted"
        );

        let trained = self.trained.insert(TrainedModel {
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            ensemble,
        });
        Ok(&*trained)
    }

    /// Whether `fit` has completed
    pub fn is_fitted(&self) -> bool {
        self.trained.is_some()
    }

    /// The fitted model
    pub fn trained(&self) -> Result<&TrainedModel> {
        self.trained.as_ref().ok_or(ForecastError::UntrainedModel)
    }

    /// Consume the wrapper, keeping only the fitted model
    pub fn into_trained(self) -> Result<TrainedModel> {
        self.trained.ok_or(ForecastError::UntrainedModel)
    }

    /// One prediction per row; fails before `fit`
    pub fn predict(&self, features: &FeatureTable) -> Result<Vec<f64>> {
        self.trained()?.predict(features)
    }
}

fn config_error(err: BoostError) -> ForecastError {
    match err {
        BoostError::InvalidParameter(msg) => ForecastError::Configuration(msg),
        other => ForecastError::Model(other),
    }
}
