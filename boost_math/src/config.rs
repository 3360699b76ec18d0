//! Hyperparameters for the boosted ensemble

use crate::{BoostError, Result};
use serde::{Deserialize, Serialize};

/// Gradient boosting configuration
///
/// Defaults mirror a conservative squared-error setup: a small learning rate,
/// shallow trees and a large ensemble cut short by early stopping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    /// Maximum number of boosting rounds (trees)
    pub n_estimators: usize,
    /// Shrinkage applied to every leaf weight
    pub learning_rate: f64,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Rounds without evaluation improvement before training halts
    pub early_stopping_rounds: Option<usize>,
    /// Fraction of rows sampled for each tree
    pub subsample: f64,
    /// Fraction of feature columns sampled for each tree
    pub colsample_bytree: f64,
    /// L2 regularization on leaf weights
    pub reg_lambda: f64,
    /// Minimum loss reduction required to split a node
    pub gamma: f64,
    /// Minimum hessian sum in each child
    pub min_child_weight: f64,
    /// Maximum number of histogram bins per feature
    pub max_bins: usize,
    /// Seed for row and column subsampling; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            n_estimators: 1000,
            learning_rate: 0.01,
            max_depth: 3,
            early_stopping_rounds: Some(20),
            subsample: 0.8,
            colsample_bytree: 1.0,
            reg_lambda: 1.0,
            gamma: 0.0,
            min_child_weight: 1.0,
            max_bins: 256,
            seed: Some(0),
        }
    }
}

impl BoostConfig {
    /// Check every hyperparameter, reporting the first invalid one
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(BoostError::InvalidParameter(
                "n_estimators must be positive".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(BoostError::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_depth == 0 {
            return Err(BoostError::InvalidParameter(
                "max_depth must be positive".to_string(),
            ));
        }
        if self.early_stopping_rounds == Some(0) {
            return Err(BoostError::InvalidParameter(
                "early_stopping_rounds must be positive when set".to_string(),
            ));
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(BoostError::InvalidParameter(format!(
                "subsample must be in (0, 1], got {}",
                self.subsample
            )));
        }
        if !(self.colsample_bytree > 0.0 && self.colsample_bytree <= 1.0) {
            return Err(BoostError::InvalidParameter(format!(
                "colsample_bytree must be in (0, 1], got {}",
                self.colsample_bytree
            )));
        }
        if !self.reg_lambda.is_finite() || self.reg_lambda < 0.0 {
            return Err(BoostError::InvalidParameter(format!(
                "reg_lambda must be non-negative, got {}",
                self.reg_lambda
            )));
        }
        if !self.gamma.is_finite() || self.gamma < 0.0 {
            return Err(BoostError::InvalidParameter(format!(
                "gamma must be non-negative, got {}",
                self.gamma
            )));
        }
        if !self.min_child_weight.is_finite() || self.min_child_weight < 0.0 {
            return Err(BoostError::InvalidParameter(format!(
                "min_child_weight must be non-negative, got {}",
                self.min_child_weight
            )));
        }
        if self.max_bins < 2 {
            return Err(BoostError::InvalidParameter(format!(
                "max_bins must be at least 2, got {}",
                self.max_bins
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = BoostConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_estimators, 1000);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.early_stopping_rounds, Some(20));
        assert!((config.learning_rate - 0.01).abs() < 1e-12);
        assert!((config.subsample - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let cases = vec![
            BoostConfig { n_estimators: 0, ..Default::default() },
            BoostConfig { learning_rate: 0.0, ..Default::default() },
            BoostConfig { learning_rate: -0.1, ..Default::default() },
            BoostConfig { max_depth: 0, ..Default::default() },
            BoostConfig { early_stopping_rounds: Some(0), ..Default::default() },
            BoostConfig { subsample: 0.0, ..Default::default() },
            BoostConfig { subsample: 1.5, ..Default::default() },
            BoostConfig { colsample_bytree: 0.0, ..Default::default() },
            BoostConfig { reg_lambda: -1.0, ..Default::default() },
            BoostConfig { max_bins: 1, ..Default::default() },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(BoostError::InvalidParameter(_))),
                "expected rejection for {:?}",
                config
            );
        }
    }
}
