//! Code table derivation.
//!
//! Walks a Huffman tree depth-first with an explicit work stack (no
//! recursion, so heavily skewed trees are fine). Descending left appends `0`,
//! descending right appends `1`; the path to each leaf is its code.

use crate::alphabet::Symbol;
use crate::bits::{Bit, BitString};
use crate::error::{Result, StructuralError};
use crate::tree::TreeNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from symbol to its (non-empty) code.
///
/// Codes derived from one tree are prefix-free because they are distinct
/// root-to-leaf paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, BitString>,
}

impl CodeTable {
    pub fn get(&self, symbol: &Symbol) -> Option<&BitString> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitString)> {
        self.codes.iter()
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_length(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of a different code.
    ///
    /// After sorting, any prefix relation shows up between neighbours.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitString> = self.codes.values().collect();
        codes.sort();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

impl FromIterator<(Symbol, BitString)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, BitString)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Derive the code table for the tree rooted at `root`.
///
/// # Errors
/// - `StructuralError::LeafRoot` if `root` is a bare leaf
/// - `StructuralError::SingleChild` for a one-child node other than a unary
///   root (root whose only child is a left leaf)
/// - `StructuralError::NoChildren` for an internal node with no children
/// - `StructuralError::DuplicateLeaf` if two leaves carry the same symbol
pub fn generate_codes(root: &TreeNode) -> Result<CodeTable> {
    if root.is_leaf() {
        return Err(StructuralError::LeafRoot.into());
    }

    let mut codes = BTreeMap::new();
    let mut stack: Vec<(&TreeNode, BitString)> = vec![(root, BitString::new())];

    while let Some((node, path)) = stack.pop() {
        match node {
            TreeNode::Leaf { symbol, .. } => {
                if codes.insert(symbol.clone(), path).is_some() {
                    return Err(StructuralError::DuplicateLeaf {
                        symbol: symbol.clone(),
                    }
                    .into());
                }
            }
            TreeNode::Internal { left, right, .. } => match (left.as_deref(), right.as_deref()) {
                (Some(l), Some(r)) => {
                    let mut right_path = path.clone();
                    right_path.push(Bit::One);
                    stack.push((r, right_path));

                    let mut left_path = path;
                    left_path.push(Bit::Zero);
                    stack.push((l, left_path));
                }
                (Some(l), None) if path.is_empty() && l.is_leaf() => {
                    let mut left_path = path;
                    left_path.push(Bit::Zero);
                    stack.push((l, left_path));
                }
                (Some(_), None) | (None, Some(_)) => {
                    return Err(StructuralError::SingleChild {
                        path: path.to_string(),
                    }
                    .into());
                }
                (None, None) => {
                    return Err(StructuralError::NoChildren {
                        path: path.to_string(),
                    }
                    .into());
                }
            },
        }
    }

    tracing::debug!(codes = codes.len(), "generated code table");
    Ok(CodeTable { codes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ProbabilityMap;
    use crate::error::Error;
    use crate::tree::build_tree;

    fn codes_for(symbols: &[&str], probabilities: &[f64]) -> CodeTable {
        let map = ProbabilityMap::from_parallel(
            symbols.iter().copied(),
            probabilities.iter().copied(),
        )
        .unwrap();
        let (root, _) = build_tree(&map).unwrap();
        generate_codes(&root).unwrap()
    }

    fn code(table: &CodeTable, s: &str) -> String {
        table.get(&Symbol::from(s)).unwrap().to_string()
    }

    fn structural(err: Error) -> StructuralError {
        match err {
            Error::Structural(s) => s,
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_three_symbol_lengths() {
        let table = codes_for(&["a", "b", "c"], &[0.5, 0.25, 0.25]);
        assert_eq!(code(&table, "a").len(), 1);
        assert_eq!(code(&table, "b").len(), 2);
        assert_eq!(code(&table, "c").len(), 2);
        assert_eq!(code(&table, "a"), "0");
        assert_eq!(code(&table, "b"), "10");
        assert_eq!(code(&table, "c"), "11");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let table = codes_for(&["a"], &[1.0]);
        assert_eq!(table.len(), 1);
        assert_eq!(code(&table, "a"), "0");
    }

    #[test]
    fn test_equal_probabilities() {
        let table = codes_for(&["a", "b", "c", "d"], &[0.25; 4]);
        assert_eq!(code(&table, "a"), "00");
        assert_eq!(code(&table, "b"), "01");
        assert_eq!(code(&table, "c"), "10");
        assert_eq!(code(&table, "d"), "11");
    }

    #[test]
    fn test_skewed_tree_is_deep() {
        let probabilities: Vec<f64> = (0..40).map(|i| 2f64.powi(-i - 1)).collect();
        let symbols: Vec<String> = (0..40).map(|i| format!("s{i}")).collect();
        let map = ProbabilityMap::from_parallel(symbols, probabilities).unwrap();
        let (root, _) = build_tree(&map).unwrap();
        let table = generate_codes(&root).unwrap();
        assert_eq!(table.max_length(), 39);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_leaf_root_rejected() {
        let err = generate_codes(&TreeNode::leaf("a", 1.0)).unwrap_err();
        assert_eq!(structural(err), StructuralError::LeafRoot);
    }

    #[test]
    fn test_single_child_rejected() {
        // Inner node at path "1" has only a left child
        let root = TreeNode::Internal {
            probability: 1.0,
            left: Some(Box::new(TreeNode::leaf("a", 0.5))),
            right: Some(Box::new(TreeNode::Internal {
                probability: 0.5,
                left: Some(Box::new(TreeNode::leaf("b", 0.5))),
                right: None,
            })),
        };
        let err = generate_codes(&root).unwrap_err();
        assert_eq!(
            structural(err),
            StructuralError::SingleChild {
                path: "1".to_string()
            }
        );
    }

    #[test]
    fn test_unary_root_must_hold_left_leaf() {
        let root = TreeNode::Internal {
            probability: 1.0,
            left: None,
            right: Some(Box::new(TreeNode::leaf("a", 1.0))),
        };
        assert!(matches!(
            structural(generate_codes(&root).unwrap_err()),
            StructuralError::SingleChild { .. }
        ));

        let nested = TreeNode::unary(TreeNode::merge(
            TreeNode::leaf("a", 0.5),
            TreeNode::leaf("b", 0.5),
        ));
        assert!(matches!(
            structural(generate_codes(&nested).unwrap_err()),
            StructuralError::SingleChild { .. }
        ));
    }

    #[test]
    fn test_childless_internal_rejected() {
        let root = TreeNode::Internal {
            probability: 1.0,
            left: Some(Box::new(TreeNode::leaf("a", 0.5))),
            right: Some(Box::new(TreeNode::Internal {
                probability: 0.5,
                left: None,
                right: None,
            })),
        };
        assert_eq!(
            structural(generate_codes(&root).unwrap_err()),
            StructuralError::NoChildren {
                path: "1".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_leaf_rejected() {
        let root = TreeNode::merge(TreeNode::leaf("a", 0.5), TreeNode::leaf("a", 0.5));
        assert!(matches!(
            structural(generate_codes(&root).unwrap_err()),
            StructuralError::DuplicateLeaf { .. }
        ));
    }

    #[test]
    fn test_prefix_check_detects_violation() {
        let table: CodeTable = [
            (Symbol::from("a"), "0".parse::<BitString>().unwrap()),
            (Symbol::from("b"), "01".parse::<BitString>().unwrap()),
        ]
        .into_iter()
        .collect();
        assert!(!table.is_prefix_free());
    }
}
