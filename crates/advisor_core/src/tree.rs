//! Decision tree structures for classification
//!
//! Provides integer-only tree nodes and deterministic traversal.

use serde::{Deserialize, Serialize};

/// A decision tree node (internal or leaf)
///
/// For internal nodes:
/// - `feature_idx >= 0`: index into feature vector
/// - `left` and `right` point to child node indices
/// - `class` is `None`
///
/// For leaf nodes:
/// - `feature_idx == -1`
/// - `class` holds the predicted class code
/// - `class_counts` holds the training distribution that reached the leaf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Node {
    /// Node ID (for reference, not used in traversal)
    pub id: i32,

    /// Left child index (-1 for leaf nodes)
    pub left: i32,

    /// Right child index (-1 for leaf nodes)
    pub right: i32,

    /// Feature index to split on (-1 for leaf nodes)
    pub feature_idx: i32,

    /// Split threshold; rows with `feature <= threshold` go left
    pub threshold: i64,

    /// Predicted class code (Some for leaf nodes)
    pub class: Option<u32>,

    /// Training samples per class code at this leaf
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_counts: Vec<u32>,
}

impl Node {
    /// Create a new internal (split) node
    pub fn internal(id: i32, feature_idx: i32, threshold: i64, left: i32, right: i32) -> Self {
        Self {
            id,
            left,
            right,
            feature_idx,
            threshold,
            class: None,
            class_counts: Vec::new(),
        }
    }

    /// Create a new leaf node
    pub fn leaf(id: i32, class: u32, class_counts: Vec<u32>) -> Self {
        Self {
            id,
            left: -1,
            right: -1,
            feature_idx: -1,
            threshold: 0,
            class: Some(class),
            class_counts,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feature_idx == -1 || self.class.is_some()
    }
}

/// A single classification tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tree {
    /// Tree nodes (node 0 is the root, children always follow their parent)
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Walk the tree and return the leaf reached by `features`
    ///
    /// Returns `None` for a malformed tree or an out-of-range feature index.
    pub fn evaluate(&self, features: &[i64]) -> Option<&Node> {
        let mut idx = 0usize;

        loop {
            let node = self.nodes.get(idx)?;

            if node.is_leaf() {
                return Some(node);
            }

            let feature_value = *features.get(usize::try_from(node.feature_idx).ok()?)?;

            let next = if feature_value <= node.threshold {
                node.left
            } else {
                node.right
            };

            // Children always sit after their parent, which rules out cycles
            idx = usize::try_from(next).ok().filter(|&n| n > idx)?;
        }
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match nodes.get(idx) {
                Some(node) if !node.is_leaf() => {
                    let child_depth = |child: i32| match usize::try_from(child) {
                        Ok(c) if c > idx => walk(nodes, c),
                        _ => 0,
                    };
                    1 + child_depth(node.left).max(child_depth(node.right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Validate tree structure against the model's feature and class counts
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("Tree has no nodes".to_string());
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                let class = node
                    .class
                    .ok_or_else(|| format!("Leaf node {i} has no class"))?;
                if class as usize >= n_classes {
                    return Err(format!("Leaf node {i} predicts unknown class {class}"));
                }
                if !node.class_counts.is_empty() && node.class_counts.len() != n_classes {
                    return Err(format!(
                        "Leaf node {i} has {} class counts, expected {n_classes}",
                        node.class_counts.len()
                    ));
                }
                continue;
            }

            for (side, child) in [("left", node.left), ("right", node.right)] {
                if child <= i as i32 || child as usize >= self.nodes.len() {
                    return Err(format!("Node {i} has invalid {side} child: {child}"));
                }
            }

            if node.feature_idx < 0 || node.feature_idx as usize >= n_features {
                return Err(format!(
                    "Internal node {i} has invalid feature index: {}",
                    node.feature_idx
                ));
            }
        }

        Ok(())
    }
}
