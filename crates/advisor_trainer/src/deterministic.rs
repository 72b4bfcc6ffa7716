//! Deterministic tie-breaking for reproducible trees
//!
//! Equal-scoring splits are resolved by a total order on the split itself,
//! so identical data always produces an identical tree.

/// Deterministic tie-breaker for split selection
/// Returns consistent ordering based on (feature_idx, threshold, node_id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SplitTieBreaker {
    pub feature_idx: usize,
    pub threshold: i64,
    pub node_id: usize,
}

impl SplitTieBreaker {
    pub fn new(feature_idx: usize, threshold: i64, node_id: usize) -> Self {
        Self {
            feature_idx,
            threshold,
            node_id,
        }
    }
}

/// Index of the largest count; the lowest index wins ties
pub fn majority_class(counts: &[u32]) -> u32 {
    let mut best = 0usize;
    for (idx, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = idx;
        }
    }
    best as u32
}
