//! Boosting loop with holdout early stopping

use crate::binning::FeatureBins;
use crate::config::BoostConfig;
use crate::tree::{grow_tree, GrowContext, RegressionTree, TreeParams};
use crate::{validate_rows, BoostError, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Held-out rows used to score each boosting round
#[derive(Debug, Clone, Copy)]
pub struct EvalSet<'a> {
    pub rows: &'a [Vec<f64>],
    pub targets: &'a [f64],
}

/// A fitted additive ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    base_score: f64,
    n_features: usize,
    trees: Vec<RegressionTree>,
    best_iteration: Option<usize>,
    best_score: Option<f64>,
    eval_history: Vec<f64>,
}

impl Ensemble {
    /// Prediction for a single feature row
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(BoostError::InvalidInput(format!(
                "row has {} features, model expects {}",
                row.len(),
                self.n_features
            )));
        }
        Ok(self.raw_predict(row))
    }

    /// Predictions for a row-major feature matrix
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        validate_rows(rows, self.n_features)?;
        Ok(rows.iter().map(|row| self.raw_predict(row)).collect())
    }

    fn raw_predict(&self, row: &[f64]) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.predict_row(row))
    }

    /// Initial prediction before any tree is applied
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    /// Number of feature columns the ensemble was trained on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees kept in the ensemble
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Fitted trees in boosting order
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Zero-based round with the lowest evaluation RMSE
    pub fn best_iteration(&self) -> Option<usize> {
        self.best_iteration
    }

    /// Lowest evaluation RMSE observed
    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Evaluation RMSE after every completed round
    pub fn eval_history(&self) -> &[f64] {
        &self.eval_history
    }
}

/// Trainer for squared-error gradient boosting
#[derive(Debug, Clone)]
pub struct GradientBooster {
    config: BoostConfig,
}

impl GradientBooster {
    /// Create a booster after validating its configuration
    pub fn new(config: BoostConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration used for fitting
    pub fn config(&self) -> &BoostConfig {
        &self.config
    }

    /// Fit an ensemble to `rows`/`targets`.
    ///
    /// When an evaluation set is supplied its RMSE is recorded after every
    /// round. With `early_stopping_rounds` configured, training halts once
    /// that many rounds pass without improvement and the ensemble is cut
    /// back to the best round.
    pub fn fit(
        &self,
        rows: &[Vec<f64>],
        targets: &[f64],
        eval: Option<EvalSet<'_>>,
    ) -> Result<Ensemble> {
        if rows.is_empty() {
            return Err(BoostError::InsufficientData(
                "training set is empty".to_string(),
            ));
        }
        if rows.len() != targets.len() {
            return Err(BoostError::InvalidInput(format!(
                "{} training rows but {} targets",
                rows.len(),
                targets.len()
            )));
        }
        if targets.iter().any(|y| !y.is_finite()) {
            return Err(BoostError::InvalidInput(
                "training targets contain non-finite values".to_string(),
            ));
        }

        let config = &self.config;
        let bins = FeatureBins::fit(rows, config.max_bins)?;
        let binned = bins.transform(rows)?;
        let n_rows = rows.len();
        let n_features = bins.n_features();

        if let Some(eval) = &eval {
            if eval.rows.is_empty() {
                return Err(BoostError::InsufficientData(
                    "evaluation set is empty".to_string(),
                ));
            }
            if eval.rows.len() != eval.targets.len() {
                return Err(BoostError::InvalidInput(format!(
                    "{} evaluation rows but {} targets",
                    eval.rows.len(),
                    eval.targets.len()
                )));
            }
            if eval.targets.iter().any(|y| !y.is_finite()) {
                return Err(BoostError::InvalidInput(
                    "evaluation targets contain non-finite values".to_string(),
                ));
            }
            validate_rows(eval.rows, n_features)?;
        }

        let base_score = targets.iter().sum::<f64>() / n_rows as f64;
        let mut train_pred = vec![base_score; n_rows];
        let mut eval_pred = eval.map(|e| vec![base_score; e.rows.len()]);

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let params = TreeParams {
            max_depth: config.max_depth,
            learning_rate: config.learning_rate,
            reg_lambda: config.reg_lambda,
            gamma: config.gamma,
            min_child_weight: config.min_child_weight,
        };

        let hess = vec![1.0; n_rows];
        let mut grad = vec![0.0; n_rows];
        let mut trees = Vec::with_capacity(config.n_estimators);
        let mut eval_history = Vec::new();
        let mut best: Option<(usize, f64)> = None;
        let mut stopped_early = false;

        for round in 0..config.n_estimators {
            for ((g, p), y) in grad.iter_mut().zip(&train_pred).zip(targets) {
                *g = p - y;
            }

            let sample = self.sample_rows(n_rows, &mut rng);
            let features = self.sample_features(n_features, &mut rng);

            let ctx = GrowContext {
                bins: &bins,
                binned: &binned,
                grad: &grad,
                hess: &hess,
                features: &features,
                params,
            };
            let tree = grow_tree(&ctx, &sample);

            for (p, row) in train_pred.iter_mut().zip(rows) {
                *p += tree.predict_row(row);
            }

            if let (Some(eval), Some(preds)) = (&eval, eval_pred.as_mut()) {
                for (p, row) in preds.iter_mut().zip(eval.rows) {
                    *p += tree.predict_row(row);
                }
                let score = rmse(preds, eval.targets);
                trace!(round, rmse = score, "Boosting round evaluated");
                eval_history.push(score);

                if best.map_or(true, |(_, best_score)| score < best_score) {
                    best = Some((round, score));
                }
            }

            trees.push(tree);

            if let (Some(patience), Some((best_round, _))) = (config.early_stopping_rounds, best) {
                if round - best_round >= patience {
                    stopped_early = true;
                    break;
                }
            }
        }

        if config.early_stopping_rounds.is_some() {
            if let Some((best_round, best_score)) = best {
                trees.truncate(best_round + 1);
                debug!(
                    rounds = eval_history.len(),
                    best_iteration = best_round,
                    best_rmse = best_score,
                    stopped_early,
                    "Boosting finished"
                );
            }
        }

        Ok(Ensemble {
            base_score,
            n_features,
            trees,
            best_iteration: best.map(|(round, _)| round),
            best_score: best.map(|(_, score)| score),
            eval_history,
        })
    }

    fn sample_rows(&self, n: usize, rng: &mut StdRng) -> Vec<usize> {
        let amount = sample_size(n, self.config.subsample);
        if amount >= n {
            return (0..n).collect();
        }
        let mut indices = index::sample(rng, n, amount).into_vec();
        indices.sort_unstable();
        indices
    }

    fn sample_features(&self, n: usize, rng: &mut StdRng) -> Vec<usize> {
        let amount = sample_size(n, self.config.colsample_bytree);
        if amount >= n {
            return (0..n).collect();
        }
        let mut indices = index::sample(rng, n, amount).into_vec();
        indices.sort_unstable();
        indices
    }
}

fn sample_size(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).ceil() as usize).clamp(1, n)
}

fn rmse(predicted: &[f64], actual: &[f64]) -> f64 {
    let sse: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).powi(2))
        .sum();
    (sse / actual.len() as f64).sqrt()
}
