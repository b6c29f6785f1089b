//! huffcode-core: Huffman prefix codes from symbol probabilities
//!
//! This library builds a Huffman tree for a finite alphabet, derives a
//! prefix-free code table from it, and uses the pair to encode and decode
//! messages. It also reports entropy-based statistics and a node layout that
//! renderers can draw.
//!
//! # Architecture
//!
//! Data flows one way, leaf modules first:
//! - `alphabet`: Symbol and validated probability map
//! - `bits`: Bit and bit-string values
//! - `tree`: Priority-queue Huffman construction with merge log
//! - `codes`: Code table derivation
//! - `codec`: Encode via table, decode via tree walk
//! - `stats`: Entropy, expected length and related figures
//! - `layout`: Node positions for tree drawings
//! - `report`: One-call pipeline producing a serializable report
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and carry the offending input
//! - **Deterministic**: Equal probabilities merge in insertion order
//! - **Owned trees**: Parents own children; no shared or back pointers
//! - **No recursion**: Tree walks use explicit stacks
//!
//! # Example
//! ```
//! use huffcode_core::{build_tree, decode, encode, generate_codes, ProbabilityMap};
//!
//! let map = ProbabilityMap::from_parallel(["a", "b", "c"], [0.5, 0.25, 0.25]).unwrap();
//! let (root, _steps) = build_tree(&map).unwrap();
//! let table = generate_codes(&root).unwrap();
//!
//! let message = map.tokenize("abacab").unwrap();
//! let bits = encode(&message, &table).unwrap();
//! assert_eq!(decode(&bits, &root).unwrap(), message);
//! ```

pub mod alphabet;
pub mod bits;
pub mod codec;
pub mod codes;
pub mod error;
pub mod layout;
pub mod report;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use alphabet::{ProbabilityMap, Symbol};
pub use bits::{Bit, BitString};
pub use codec::{decode, encode};
pub use codes::{generate_codes, CodeTable};
pub use error::{Error, Result};
pub use layout::layout;
pub use report::{analyze, Report};
pub use stats::{compute_statistics, Statistics};
pub use tree::{build_tree, MergeStep, TreeNode};
