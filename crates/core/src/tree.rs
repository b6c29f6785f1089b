//! Huffman tree construction.
//!
//! # Algorithm
//!
//! 1. One leaf per symbol, all pushed into a min-heap
//! 2. Pop the two least probable nodes; the first becomes the left child
//! 3. Push their merged parent back, record a [`MergeStep`]
//! 4. Stop when one node remains; it is the root
//!
//! Each merge is O(log n), so a build is O(n log n).
//!
//! # Determinism
//!
//! Heap entries are keyed by `(probability, order)`. Leaves take their
//! insertion index as `order`; merged nodes take `n + merge_index`. Equal
//! probabilities therefore resolve by insertion order, with every leaf ahead
//! of every merged node and merged nodes in creation order. The heap's
//! internal layout never influences the result.
//!
//! # Single Symbol
//!
//! A one-symbol alphabet has no merges. Its leaf is placed as the left child
//! of a *unary root* (an internal node with an empty right slot) so that the
//! symbol gets the one-bit code `0` instead of an undecodable empty code.

use crate::alphabet::{ProbabilityMap, Symbol};
use crate::bits::Bit;
use crate::error::{Result, ValidationError};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of a Huffman tree.
///
/// Internal nodes own their children exclusively. Child slots are `Option`
/// so that hand-built malformed trees can be represented and rejected by
/// code generation and decoding; [`build_tree`] only ever leaves a slot empty
/// on the unary root.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf {
        symbol: Symbol,
        probability: f64,
    },
    Internal {
        probability: f64,
        left: Option<Box<TreeNode>>,
        right: Option<Box<TreeNode>>,
    },
}

impl TreeNode {
    pub fn leaf(symbol: impl Into<Symbol>, probability: f64) -> Self {
        TreeNode::Leaf {
            symbol: symbol.into(),
            probability,
        }
    }

    /// Merge two nodes under a new parent whose probability is their sum.
    pub fn merge(left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal {
            probability: left.probability() + right.probability(),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Root of a single-symbol tree: `child` on the left, nothing on the right.
    pub fn unary(child: TreeNode) -> Self {
        TreeNode::Internal {
            probability: child.probability(),
            left: Some(Box::new(child)),
            right: None,
        }
    }

    pub fn probability(&self) -> f64 {
        match self {
            TreeNode::Leaf { probability, .. } => *probability,
            TreeNode::Internal { probability, .. } => *probability,
        }
    }

    /// The symbol of a leaf; `None` for internal nodes.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    pub fn left(&self) -> Option<&TreeNode> {
        match self {
            TreeNode::Internal { left, .. } => left.as_deref(),
            TreeNode::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&TreeNode> {
        match self {
            TreeNode::Internal { right, .. } => right.as_deref(),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Child selected by `bit`: `0` is left, `1` is right.
    pub fn child(&self, bit: Bit) -> Option<&TreeNode> {
        match bit {
            Bit::Zero => self.left(),
            Bit::One => self.right(),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { .. } => count += 1,
                TreeNode::Internal { left, right, .. } => {
                    stack.extend(left.as_deref());
                    stack.extend(right.as_deref());
                }
            }
        }
        count
    }
}

/// One merge performed during construction, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeStep {
    /// Symbol of the left node, `None` if it was itself a merge
    pub left_symbol: Option<Symbol>,
    pub left_probability: f64,
    /// Symbol of the right node, `None` if it was itself a merge
    pub right_symbol: Option<Symbol>,
    pub right_probability: f64,
    pub merged_probability: f64,
}

/// Heap entry (min-heap: lowest probability, then lowest order, first).
#[derive(Debug)]
struct Pending {
    probability: f64,
    order: usize,
    node: TreeNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .probability
            .total_cmp(&self.probability)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Build a Huffman tree for `map`.
///
/// Returns the root together with the merges in the order they happened.
/// For a single symbol the root is a unary root and no merges are reported.
pub fn build_tree(map: &ProbabilityMap) -> Result<(TreeNode, Vec<MergeStep>)> {
    let n = map.len();
    tracing::debug!(symbols = n, total = map.total(), "building huffman tree");

    let mut heap: BinaryHeap<Pending> = map
        .iter()
        .enumerate()
        .map(|(order, entry)| Pending {
            probability: entry.probability,
            order,
            node: TreeNode::leaf(entry.symbol.clone(), entry.probability),
        })
        .collect();

    let mut steps = Vec::with_capacity(n.saturating_sub(1));

    while heap.len() > 1 {
        let left = heap.pop().ok_or(ValidationError::Empty)?;
        let right = heap.pop().ok_or(ValidationError::Empty)?;

        let step = MergeStep {
            left_symbol: left.node.symbol().cloned(),
            left_probability: left.probability,
            right_symbol: right.node.symbol().cloned(),
            right_probability: right.probability,
            merged_probability: left.probability + right.probability,
        };
        tracing::trace!(
            step = steps.len(),
            left = left.probability,
            right = right.probability,
            merged = step.merged_probability,
            "merge"
        );

        let order = n + steps.len();
        steps.push(step);

        let node = TreeNode::merge(left.node, right.node);
        heap.push(Pending {
            probability: node.probability(),
            order,
            node,
        });
    }

    let root = heap.pop().ok_or(ValidationError::Empty)?.node;
    let root = if root.is_leaf() {
        TreeNode::unary(root)
    } else {
        root
    };

    tracing::debug!(merges = steps.len(), "huffman tree built");
    Ok((root, steps))
}
