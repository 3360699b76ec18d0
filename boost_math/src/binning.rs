//! Feature binning for histogram split search
//!
//! Each feature column is mapped once onto a small set of ordered bins.
//! Columns with few distinct values (calendar fields, flags) keep one bin
//! per value; wider columns fall back to quantile cut points.

use crate::{validate_rows, BoostError, Result};
use serde::{Deserialize, Serialize};

/// Per-feature upper bounds of each histogram bin.
///
/// A value `x` of feature `f` lands in the first bin `b` with
/// `x <= cuts[f][b]`; values above the last cut land in the last bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBins {
    cuts: Vec<Vec<f64>>,
}

/// Column-major bin indices for a training matrix
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedMatrix {
    n_rows: usize,
    columns: Vec<Vec<usize>>,
}

impl FeatureBins {
    /// Learn cut points from a row-major feature matrix
    pub fn fit(rows: &[Vec<f64>], max_bins: usize) -> Result<Self> {
        if max_bins < 2 {
            return Err(BoostError::InvalidParameter(format!(
                "max_bins must be at least 2, got {}",
                max_bins
            )));
        }
        let first = rows.first().ok_or_else(|| {
            BoostError::InsufficientData("cannot bin an empty feature matrix".to_string())
        })?;
        let n_features = first.len();
        if n_features == 0 {
            return Err(BoostError::InvalidInput(
                "feature rows must have at least one column".to_string(),
            ));
        }
        validate_rows(rows, n_features)?;

        let cuts = (0..n_features)
            .map(|f| {
                let mut column: Vec<f64> = rows.iter().map(|row| row[f]).collect();
                column.sort_by(|a, b| a.total_cmp(b));
                column_cuts(&column, max_bins)
            })
            .collect();

        Ok(Self { cuts })
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.cuts.len()
    }

    /// Number of bins for a feature
    pub fn n_bins(&self, feature: usize) -> usize {
        self.cuts[feature].len()
    }

    /// Bin index of a raw feature value
    pub fn bin(&self, feature: usize, value: f64) -> usize {
        let cuts = &self.cuts[feature];
        cuts.partition_point(|&c| c < value).min(cuts.len() - 1)
    }

    /// Split threshold separating bins `..=bin` from the rest
    pub fn threshold(&self, feature: usize, bin: usize) -> f64 {
        self.cuts[feature][bin]
    }

    /// Map every row onto bin indices
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<BinnedMatrix> {
        validate_rows(rows, self.n_features())?;

        let columns = (0..self.n_features())
            .map(|f| rows.iter().map(|row| self.bin(f, row[f])).collect())
            .collect();

        Ok(BinnedMatrix {
            n_rows: rows.len(),
            columns,
        })
    }
}

impl BinnedMatrix {
    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Bin indices of one feature column
    pub fn column(&self, feature: usize) -> &[usize] {
        &self.columns[feature]
    }
}

/// Cut points for one sorted column
fn column_cuts(sorted: &[f64], max_bins: usize) -> Vec<f64> {
    let mut distinct = sorted.to_vec();
    distinct.dedup();
    if distinct.len() <= max_bins {
        return distinct;
    }

    let n = sorted.len();
    let mut cuts: Vec<f64> = (1..=max_bins)
        .map(|k| {
            let rank = (k * n + max_bins - 1) / max_bins;
            sorted[rank.saturating_sub(1).min(n - 1)]
        })
        .collect();
    cuts.dedup();
    cuts
}
