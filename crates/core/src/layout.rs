//! Tree layout for renderers.
//!
//! Computes a position for every node and a labelled edge for every
//! parent/child link. The root sits at `(0, 0)`; each level is one unit
//! lower, and the horizontal offset starts at [`INITIAL_SPREAD`] and halves
//! per level (left children to the left, right children to the right).
//!
//! Drawing is left to the consumer. The traversal uses an explicit stack.

use crate::alphabet::Symbol;
use crate::bits::Bit;
use crate::tree::TreeNode;
use serde::Serialize;

/// Horizontal offset between the root and its children.
pub const INITIAL_SPREAD: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Preorder index, root = 0
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub symbol: Option<Symbol>,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub parent: usize,
    pub child: usize,
    /// 0 for a left edge, 1 for a right edge
    pub bit: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl Layout {
    /// Deepest level (root = 0).
    pub fn depth(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| (-n.y).round() as usize)
            .max()
            .unwrap_or(0)
    }
}

fn round3(p: f64) -> f64 {
    (p * 1000.0).round() / 1000.0
}

fn label(node: &TreeNode) -> String {
    match node {
        TreeNode::Leaf {
            symbol,
            probability,
        } => format!("{}:{}", symbol.as_str(), round3(*probability)),
        TreeNode::Internal { probability, .. } => format!("{}", round3(*probability)),
    }
}

/// Lay out the tree rooted at `root`.
///
/// Works on any tree, malformed ones included: empty child slots simply
/// produce no node.
pub fn layout(root: &TreeNode) -> Layout {
    let mut out = Layout::default();
    // (node, parent id + bit, x, y, dx)
    let mut stack: Vec<(&TreeNode, Option<(usize, Bit)>, f64, f64, f64)> =
        vec![(root, None, 0.0, 0.0, INITIAL_SPREAD)];

    while let Some((node, parent, x, y, dx)) = stack.pop() {
        let id = out.nodes.len();
        out.nodes.push(LayoutNode {
            id,
            x,
            y,
            label: label(node),
            symbol: node.symbol().cloned(),
            probability: node.probability(),
        });

        if let Some((parent, bit)) = parent {
            out.edges.push(LayoutEdge {
                parent,
                child: id,
                bit: bit.as_u8(),
            });
        }

        // Right first so the left subtree is numbered first
        if let Some(right) = node.right() {
            stack.push((right, Some((id, Bit::One)), x + dx, y - 1.0, dx / 2.0));
        }
        if let Some(left) = node.left() {
            stack.push((left, Some((id, Bit::Zero)), x - dx, y - 1.0, dx / 2.0));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ProbabilityMap;
    use crate::tree::build_tree;

    #[test]
    fn test_three_symbol_layout() {
        let map = ProbabilityMap::from_parallel(["a", "b", "c"], [0.5, 0.25, 0.25]).unwrap();
        let (root, _) = build_tree(&map).unwrap();
        let layout = layout(&root);

        assert_eq!(layout.nodes.len(), 5);
        assert_eq!(layout.edges.len(), 4);

        let root_node = &layout.nodes[0];
        assert_eq!((root_node.x, root_node.y), (0.0, 0.0));
        assert_eq!(root_node.label, "1");

        // Preorder: root, a, merged(b,c), b, c
        let a = &layout.nodes[1];
        assert_eq!(a.label, "a:0.5");
        assert_eq!((a.x, a.y), (-1.5, -1.0));

        let merged = &layout.nodes[2];
        assert_eq!((merged.x, merged.y), (1.5, -1.0));
        let b = &layout.nodes[3];
        assert_eq!((b.x, b.y), (0.75, -2.0));
        let c = &layout.nodes[4];
        assert_eq!((c.x, c.y), (2.25, -2.0));

        assert_eq!(
            layout.edges[0],
            LayoutEdge {
                parent: 0,
                child: 1,
                bit: 0
            }
        );
        assert_eq!(layout.depth(), 2);
    }

    #[test]
    fn test_empty_symbol_is_labelled_as_leaf() {
        let root = TreeNode::merge(TreeNode::leaf("", 0.5), TreeNode::leaf("x", 0.5));
        let layout = layout(&root);
        assert_eq!(layout.nodes[1].label, ":0.5");
        assert_eq!(layout.nodes[1].symbol, Some(Symbol::from("")));
    }

    #[test]
    fn test_probability_rounding() {
        let root = TreeNode::unary(TreeNode::leaf("q", 0.123456));
        let layout = layout(&root);
        assert_eq!(layout.nodes[1].label, "q:0.123");
        assert_eq!(layout.edges.len(), 1);
    }
}
