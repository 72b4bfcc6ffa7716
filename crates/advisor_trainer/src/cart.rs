//! CART (Classification and Regression Tree) builder
//!
//! Implements deterministic exact-greedy classification tree construction
//! scored by Gini impurity in fixed-point integer arithmetic.

use stack_advisor_core::{Node, Tree};
use std::collections::BTreeSet;

use crate::deterministic::{majority_class, SplitTieBreaker};

/// Fixed-point scale of split scores
const SCORE_SCALE: i128 = 1_000_000;

/// Training parameters for a single tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// `None` grows the tree until every leaf is pure
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Split candidate with score and tie-breaker
#[derive(Debug, Clone)]
struct SplitCandidate {
    feature_idx: usize,
    threshold: i64,
    score: i128,
    tie_breaker: SplitTieBreaker,
}

impl SplitCandidate {
    fn new(feature_idx: usize, threshold: i64, score: i128, node_id: usize) -> Self {
        Self {
            feature_idx,
            threshold,
            score,
            tie_breaker: SplitTieBreaker::new(feature_idx, threshold, node_id),
        }
    }

    fn beats(&self, other: &SplitCandidate) -> bool {
        self.score > other.score
            || (self.score == other.score && self.tie_breaker < other.tie_breaker)
    }
}

/// Build a classification tree using the exact-greedy CART algorithm
pub struct CartBuilder<'a> {
    config: TreeConfig,
    features: &'a [Vec<i64>],
    targets: &'a [u32],
    n_classes: usize,
    feature_count: usize,
}

impl<'a> CartBuilder<'a> {
    pub fn new(
        features: &'a [Vec<i64>],
        targets: &'a [u32],
        n_classes: usize,
        config: TreeConfig,
    ) -> Self {
        assert_eq!(features.len(), targets.len());

        let feature_count = features.first().map_or(0, Vec::len);

        Self {
            config,
            features,
            targets,
            n_classes,
            feature_count,
        }
    }

    /// Build tree and return nodes
    pub fn build(&self) -> Tree {
        let mut nodes = Vec::new();
        let indices: Vec<usize> = (0..self.features.len()).collect();

        self.build_node(&indices, 0, &mut nodes);

        Tree::new(nodes)
    }

    /// Recursively build tree nodes in pre-order; returns the node's index
    fn build_node(&self, indices: &[usize], depth: usize, nodes: &mut Vec<Node>) -> i32 {
        let current_idx = nodes.len();
        let counts = self.class_counts(indices);

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);

        if pure
            || depth_reached
            || indices.len() < self.config.min_samples_split
            || indices.len() < 2 * self.config.min_samples_leaf
        {
            return self.push_leaf(nodes, counts);
        }

        // Find best split
        let split = match self.find_best_split(indices, &counts, current_idx) {
            Some(s) => s,
            None => return self.push_leaf(nodes, counts),
        };

        let (left_indices, right_indices) =
            self.split_samples(indices, split.feature_idx, split.threshold);

        // Reserve space for current node
        nodes.push(Node::internal(
            current_idx as i32,
            split.feature_idx as i32,
            split.threshold,
            -1,
            -1,
        ));

        let left_idx = self.build_node(&left_indices, depth + 1, nodes);
        let right_idx = self.build_node(&right_indices, depth + 1, nodes);

        nodes[current_idx].left = left_idx;
        nodes[current_idx].right = right_idx;

        current_idx as i32
    }

    fn push_leaf(&self, nodes: &mut Vec<Node>, counts: Vec<u32>) -> i32 {
        let idx = nodes.len() as i32;
        nodes.push(Node::leaf(idx, majority_class(&counts), counts));
        idx
    }

    /// Find best split using exact-greedy search over every feature
    fn find_best_split(
        &self,
        indices: &[usize],
        parent_counts: &[u32],
        node_id: usize,
    ) -> Option<SplitCandidate> {
        let mut best_split: Option<SplitCandidate> = None;

        for feature_idx in 0..self.feature_count {
            for threshold in self.candidate_thresholds(indices, feature_idx) {
                let mut left_counts = vec![0u32; self.n_classes];
                let mut left_len = 0usize;
                for &idx in indices {
                    if self.features[idx][feature_idx] <= threshold {
                        left_counts[self.targets[idx] as usize] += 1;
                        left_len += 1;
                    }
                }
                let right_len = indices.len() - left_len;

                if left_len < self.config.min_samples_leaf
                    || right_len < self.config.min_samples_leaf
                {
                    continue;
                }

                let right_counts: Vec<u32> = parent_counts
                    .iter()
                    .zip(&left_counts)
                    .map(|(&p, &l)| p - l)
                    .collect();

                let score = purity_score(&left_counts, left_len)
                    + purity_score(&right_counts, right_len);

                let candidate = SplitCandidate::new(feature_idx, threshold, score, node_id);

                best_split = match best_split {
                    Some(current) if !candidate.beats(&current) => Some(current),
                    _ => Some(candidate),
                };
            }
        }

        best_split
    }

    /// Distinct feature values in the node, except the largest
    fn candidate_thresholds(&self, indices: &[usize], feature_idx: usize) -> Vec<i64> {
        let values: BTreeSet<i64> = indices
            .iter()
            .map(|&idx| self.features[idx][feature_idx])
            .collect();

        let mut thresholds: Vec<i64> = values.into_iter().collect();
        thresholds.pop();
        thresholds
    }

    /// Split samples based on threshold
    fn split_samples(
        &self,
        indices: &[usize],
        feature_idx: usize,
        threshold: i64,
    ) -> (Vec<usize>, Vec<usize>) {
        indices
            .iter()
            .copied()
            .partition(|&idx| self.features[idx][feature_idx] <= threshold)
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<u32> {
        let mut counts = vec![0u32; self.n_classes];
        for &idx in indices {
            counts[self.targets[idx] as usize] += 1;
        }
        counts
    }
}

/// Σ c_k² · SCALE / n for one child
///
/// Weighted Gini of a split is `N - Σ_children (Σ c_k² / n_child)`, so
/// maximising the summed score minimises the weighted impurity.
fn purity_score(counts: &[u32], n: usize) -> i128 {
    if n == 0 {
        return 0;
    }
    let sum_sq: i128 = counts.iter().map(|&c| (c as i128) * (c as i128)).sum();
    sum_sq * SCORE_SCALE / n as i128
}
