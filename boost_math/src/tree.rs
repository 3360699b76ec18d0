//! Regression trees grown on gradient statistics
//!
//! Split scoring follows the second-order formulation:
//! `Gain = 0.5 * [GL²/(HL+λ) + GR²/(HR+λ) - G²/(H+λ)] - γ`
//! and leaf weights are `-G / (H + λ)` scaled by the learning rate.

use crate::binning::{BinnedMatrix, FeatureBins};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A node of a fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// A fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    root: TreeNode,
}

impl RegressionTree {
    /// Output of the tree for one feature row
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Number of split levels below the root
    pub fn depth(&self) -> usize {
        fn depth_of(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }

    /// Number of leaves
    pub fn n_leaves(&self) -> usize {
        fn leaves_of(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => leaves_of(left) + leaves_of(right),
            }
        }
        leaves_of(&self.root)
    }
}

/// Parameters that shape a single tree
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub learning_rate: f64,
    pub reg_lambda: f64,
    pub gamma: f64,
    pub min_child_weight: f64,
}

/// Shared, read-only inputs for growing one tree
pub(crate) struct GrowContext<'a> {
    pub bins: &'a FeatureBins,
    pub binned: &'a BinnedMatrix,
    pub grad: &'a [f64],
    pub hess: &'a [f64],
    pub features: &'a [usize],
    pub params: TreeParams,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    bin: usize,
    gain: f64,
}

/// Grow a tree on the given row subset
pub(crate) fn grow_tree(ctx: &GrowContext<'_>, rows: &[usize]) -> RegressionTree {
    RegressionTree {
        root: grow_node(ctx, rows, 0),
    }
}

fn grow_node(ctx: &GrowContext<'_>, rows: &[usize], depth: usize) -> TreeNode {
    let g_sum: f64 = rows.iter().map(|&i| ctx.grad[i]).sum();
    let h_sum: f64 = rows.iter().map(|&i| ctx.hess[i]).sum();
    let params = &ctx.params;
    let leaf = TreeNode::Leaf {
        value: leaf_weight(g_sum, h_sum, params.reg_lambda) * params.learning_rate,
    };

    if depth >= params.max_depth || rows.len() < 2 {
        return leaf;
    }

    // Per-feature search runs in parallel; the reduction below is sequential
    // so ties always resolve to the lowest feature index.
    let candidates: Vec<Option<SplitCandidate>> = ctx
        .features
        .par_iter()
        .map(|&f| best_split_for_feature(ctx, rows, f, g_sum, h_sum))
        .collect();

    let mut best: Option<SplitCandidate> = None;
    for candidate in candidates.into_iter().flatten() {
        if best.map_or(true, |b| candidate.gain > b.gain) {
            best = Some(candidate);
        }
    }

    let Some(split) = best else {
        return leaf;
    };

    let column = ctx.binned.column(split.feature);
    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
        rows.iter().partition(|&&i| column[i] <= split.bin);

    TreeNode::Split {
        feature: split.feature,
        threshold: ctx.bins.threshold(split.feature, split.bin),
        left: Box::new(grow_node(ctx, &left_rows, depth + 1)),
        right: Box::new(grow_node(ctx, &right_rows, depth + 1)),
    }
}

fn best_split_for_feature(
    ctx: &GrowContext<'_>,
    rows: &[usize],
    feature: usize,
    g_total: f64,
    h_total: f64,
) -> Option<SplitCandidate> {
    let n_bins = ctx.bins.n_bins(feature);
    if n_bins < 2 {
        return None;
    }

    let column = ctx.binned.column(feature);
    let mut g_hist = vec![0.0; n_bins];
    let mut h_hist = vec![0.0; n_bins];
    let mut counts = vec![0usize; n_bins];
    for &i in rows {
        let b = column[i];
        g_hist[b] += ctx.grad[i];
        h_hist[b] += ctx.hess[i];
        counts[b] += 1;
    }

    let params = &ctx.params;
    let lambda = params.reg_lambda;
    let parent_score = score(g_total, h_total, lambda);

    let mut g_left = 0.0;
    let mut h_left = 0.0;
    let mut n_left = 0usize;
    let mut best: Option<SplitCandidate> = None;

    for bin in 0..n_bins - 1 {
        g_left += g_hist[bin];
        h_left += h_hist[bin];
        n_left += counts[bin];

        // Empty bins repeat the previous partition
        if counts[bin] == 0 || n_left == 0 {
            continue;
        }
        let n_right = rows.len() - n_left;
        if n_right == 0 {
            break;
        }

        let g_right = g_total - g_left;
        let h_right = h_total - h_left;
        if h_left < params.min_child_weight || h_right < params.min_child_weight {
            continue;
        }

        let gain = 0.5
            * (score(g_left, h_left, lambda) + score(g_right, h_right, lambda) - parent_score)
            - params.gamma;

        if gain > 0.0 && best.map_or(true, |b| gain > b.gain) {
            best = Some(SplitCandidate { feature, bin, gain });
        }
    }

    best
}

fn score(g: f64, h: f64, lambda: f64) -> f64 {
    let denom = h + lambda;
    if denom <= 0.0 {
        0.0
    } else {
        g * g / denom
    }
}

fn leaf_weight(g: f64, h: f64, lambda: f64) -> f64 {
    let denom = h + lambda;
    if denom <= 0.0 {
        0.0
    } else {
        -g / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 3,
            learning_rate: 1.0,
            reg_lambda: 0.0,
            gamma: 0.0,
            min_child_weight: 1.0,
        }
    }

    #[test]
    fn test_step_function_is_learned_exactly() {
        // y = 10 for x < 5, y = 20 otherwise; gradients at prediction 0
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|i| if i < 5 { 10.0 } else { 20.0 }).collect();
        let grad: Vec<f64> = targets.iter().map(|y| -y).collect();
        let hess = vec![1.0; 10];

        let bins = FeatureBins::fit(&rows, 256).unwrap();
        let binned = bins.transform(&rows).unwrap();
        let ctx = GrowContext {
            bins: &bins,
            binned: &binned,
            grad: &grad,
            hess: &hess,
            features: &[0],
            params: TreeParams {
                max_depth: 1,
                ..params()
            },
        };
        let all: Vec<usize> = (0..10).collect();
        let tree = grow_tree(&ctx, &all);

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_leaves(), 2);
        assert_relative_eq!(tree.predict_row(&[2.0]), 10.0, epsilon = 1e-12);
        assert_relative_eq!(tree.predict_row(&[7.0]), 20.0, epsilon = 1e-12);
        assert_relative_eq!(tree.predict_row(&[4.5]), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_gradients_give_single_leaf() {
        let rows: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64, (i % 2) as f64]).collect();
        let grad = vec![-3.0; 8];
        let hess = vec![1.0; 8];

        let bins = FeatureBins::fit(&rows, 256).unwrap();
        let binned = bins.transform(&rows).unwrap();
        let ctx = GrowContext {
            bins: &bins,
            binned: &binned,
            grad: &grad,
            hess: &hess,
            features: &[0, 1],
            params: params(),
        };
        let all: Vec<usize> = (0..8).collect();
        let tree = grow_tree(&ctx, &all);

        assert_eq!(tree.n_leaves(), 1);
        assert_relative_eq!(tree.predict_row(&[0.0, 0.0]), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_depth_limit_and_shrinkage() {
        let rows: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let grad: Vec<f64> = (0..64).map(|i| -(i as f64)).collect();
        let hess = vec![1.0; 64];

        let bins = FeatureBins::fit(&rows, 256).unwrap();
        let binned = bins.transform(&rows).unwrap();
        let ctx = GrowContext {
            bins: &bins,
            binned: &binned,
            grad: &grad,
            hess: &hess,
            features: &[0],
            params: TreeParams {
                max_depth: 2,
                learning_rate: 0.5,
                ..params()
            },
        };
        let all: Vec<usize> = (0..64).collect();
        let tree = grow_tree(&ctx, &all);

        assert_eq!(tree.depth(), 2);
        assert!(tree.n_leaves() <= 4);
        // Shrunken leaf values stay below the raw targets of their region
        assert!(tree.predict_row(&[63.0]) < 63.0);
        assert!(tree.predict_row(&[63.0]) > tree.predict_row(&[0.0]));
    }
}
