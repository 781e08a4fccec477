// Rust guideline compliant 2026-10-19

//! Bagged regression-tree forest used as the trained scoring model.
//!
//! Each tree is grown on a bootstrap resample drawn from a seeded
//! [`StdRng`], splitting on the threshold that most reduces squared error.
//! The forest predicts the mean of its trees. Identical samples, parameters,
//! and seed always produce an identical forest.

use domain::FeatureVector;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Number of input features.
pub const FEATURES: usize = FeatureVector::LEN;

/// Minimum squared-error reduction for a split to be kept.
const MIN_GAIN: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Training data
// ---------------------------------------------------------------------------

/// One labelled row: encoded features and target score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub features: [f64; FEATURES],
    pub target: f64,
}

impl TrainingSample {
    fn new(codes: [u8; FEATURES], target: u8) -> Self {
        Self { features: codes.map(f64::from), target: f64::from(target) }
    }
}

/// The embedded synthetic training set: five high, five medium, and five
/// low-value leads in encoded form `(source, size, engagement, budget, timeline)`.
#[must_use]
pub fn training_samples() -> Vec<TrainingSample> {
    vec![
        // high
        TrainingSample::new([0, 2, 5, 2, 0], 95),
        TrainingSample::new([1, 2, 5, 2, 1], 88),
        TrainingSample::new([0, 1, 4, 2, 0], 82),
        TrainingSample::new([2, 2, 5, 1, 0], 78),
        TrainingSample::new([3, 1, 5, 2, 1], 85),
        // medium
        TrainingSample::new([1, 1, 3, 1, 1], 65),
        TrainingSample::new([2, 1, 4, 1, 1], 60),
        TrainingSample::new([0, 0, 4, 1, 2], 55),
        TrainingSample::new([3, 2, 3, 1, 1], 58),
        TrainingSample::new([1, 0, 4, 0, 0], 52),
        // low
        TrainingSample::new([2, 0, 2, 3, 2], 35),
        TrainingSample::new([1, 0, 1, 3, 2], 25),
        TrainingSample::new([2, 1, 2, 3, 2], 30),
        TrainingSample::new([3, 0, 2, 0, 2], 28),
        TrainingSample::new([1, 1, 1, 3, 2], 22),
    ]
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Hyper-parameters for [`RegressionForest::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    /// Number of trees (at least 1).
    pub trees: usize,
    /// Maximum depth of each tree; a depth-0 tree is a single leaf.
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
    /// Seed for bootstrap sampling.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self { trees: 100, max_depth: 10, min_samples_split: 2, seed: 42 }
    }
}

// ---------------------------------------------------------------------------
// RegressionTree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    error: f64,
}

/// A single CART-style regression tree stored as a flat node list; the root
/// is node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn fit(samples: &[TrainingSample], indices: &[usize], params: &ForestParams) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(samples, indices, 0, params);
        tree
    }

    fn grow(
        &mut self,
        samples: &[TrainingSample],
        indices: &[usize],
        depth: usize,
        params: &ForestParams,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean(samples, indices) });

        if depth >= params.max_depth || indices.len() < params.min_samples_split.max(2) {
            return id;
        }
        let Some(split) = best_split(samples, indices) else {
            return id;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| samples[i].features[split.feature] <= split.threshold);
        let left = self.grow(samples, &left_idx, depth + 1, params);
        let right = self.grow(samples, &right_idx, depth + 1, params);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Walk from the root to a leaf. Malformed links end the walk at 0.0.
    fn predict(&self, x: &[f64; FEATURES]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes.get(id) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split { feature, threshold, left, right }) => {
                    let v = x.get(*feature).copied().unwrap_or_default();
                    id = if v <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    fn split_features(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Split { feature, .. } => Some(*feature),
            Node::Leaf { .. } => None,
        })
    }

    /// Child links must point forward and stay in bounds, so prediction
    /// always terminates.
    fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(id, node)| match node {
                Node::Leaf { value } => value.is_finite(),
                Node::Split { feature, threshold, left, right } => {
                    *feature < FEATURES
                        && threshold.is_finite()
                        && *left > id
                        && *right > id
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }
}

#[expect(clippy::cast_precision_loss, reason = "sample counts are tiny")]
fn mean(samples: &[TrainingSample], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| samples[i].target).sum::<f64>() / indices.len() as f64
}

fn squared_error(samples: &[TrainingSample], indices: &[usize]) -> f64 {
    let m = mean(samples, indices);
    indices.iter().map(|&i| (samples[i].target - m).powi(2)).sum()
}

/// Lowest-error threshold over all features, or `None` when no split beats
/// the parent by at least [`MIN_GAIN`]. Ties keep the first candidate found.
fn best_split(samples: &[TrainingSample], indices: &[usize]) -> Option<SplitCandidate> {
    let parent_error = squared_error(samples, indices);
    let mut best: Option<SplitCandidate> = None;

    for feature in 0..FEATURES {
        let mut values: Vec<f64> = indices.iter().map(|&i| samples[i].features[feature]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right): (Vec<usize>, Vec<usize>) =
                indices.iter().copied().partition(|&i| samples[i].features[feature] <= threshold);
            let error = squared_error(samples, &left) + squared_error(samples, &right);
            if parent_error - error >= MIN_GAIN && best.as_ref().is_none_or(|b| error < b.error) {
                best = Some(SplitCandidate { feature, threshold, error });
            }
        }
    }
    best
}

// ---------------------------------------------------------------------------
// RegressionForest
// ---------------------------------------------------------------------------

/// Seeded bagged ensemble of [`RegressionTree`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionForest {
    trees: Vec<RegressionTree>,
}

impl RegressionForest {
    /// Fit `params.trees` trees on bootstrap resamples of `samples`.
    ///
    /// An empty sample set yields a forest of single zero-valued leaves.
    #[must_use]
    pub fn fit(samples: &[TrainingSample], params: &ForestParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let n = samples.len();
        let trees = (0..params.trees.max(1))
            .map(|_| {
                let bootstrap: Vec<usize> = if n == 0 {
                    Vec::new()
                } else {
                    (0..n).map(|_| rng.random_range(0..n)).collect()
                };
                RegressionTree::fit(samples, &bootstrap, params)
            })
            .collect();
        Self { trees }
    }

    /// Mean prediction across trees.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "tree counts are small")]
    pub fn predict(&self, x: &[f64; FEATURES]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|t| t.predict(x)).sum::<f64>() / self.trees.len() as f64
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Share of all splits made on each feature, in [`FeatureVector::NAMES`]
    /// order. All zeros when no tree ever split.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "split counts are small")]
    pub fn feature_importance(&self) -> [f64; FEATURES] {
        let mut counts = [0usize; FEATURES];
        for feature in self.trees.iter().flat_map(RegressionTree::split_features) {
            if let Some(count) = counts.get_mut(feature) {
                *count += 1;
            }
        }
        let total: usize = counts.iter().sum();
        if total == 0 {
            return [0.0; FEATURES];
        }
        counts.map(|c| c as f64 / total as f64)
    }

    /// `true` when the forest has at least one tree and every tree is
    /// structurally sound.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.trees.is_empty() && self.trees.iter().all(RegressionTree::is_well_formed)
    }
}
