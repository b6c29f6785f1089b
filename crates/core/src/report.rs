//! End-to-end analysis of one alphabet (and optionally one message).
//!
//! [`analyze`] runs the full pipeline: build the tree, derive codes, compute
//! statistics and layout, and, when a message is supplied, tokenize, encode
//! and decode it. The resulting [`Report`] is plain data; front ends render
//! it as they like ([`Report::render_text`] is the built-in text form).

use crate::alphabet::{Entry, ProbabilityMap, Symbol};
use crate::bits::BitString;
use crate::codec::{decode, encode};
use crate::codes::{generate_codes, CodeTable};
use crate::error::Result;
use crate::layout::{layout, Layout};
use crate::stats::{compute_statistics, Statistics};
use crate::tree::{build_tree, MergeStep, TreeNode};
use serde::Serialize;
use std::fmt::Write as _;

/// Outcome of encoding and decoding one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageReport {
    pub text: String,
    pub symbols: Vec<Symbol>,
    pub encoded: BitString,
    pub decoded: String,
    pub round_trip_ok: bool,
    /// Encoded size relative to a fixed-length code
    pub compression_ratio: f64,
}

/// Everything a front end needs to present one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub probabilities: Vec<Entry>,
    pub codes: CodeTable,
    pub merge_steps: Vec<MergeStep>,
    pub statistics: Statistics,
    pub layout: Layout,
    pub message: Option<MessageReport>,
    #[serde(skip)]
    pub tree: TreeNode,
}

/// Run the whole pipeline for `map` and an optional message.
///
/// An empty message is treated as no message.
pub fn analyze(map: &ProbabilityMap, message: Option<&str>) -> Result<Report> {
    let (tree, merge_steps) = build_tree(map)?;
    let codes = generate_codes(&tree)?;
    let statistics = compute_statistics(map, &codes)?;

    let message = match message.filter(|m| !m.is_empty()) {
        Some(text) => {
            let symbols = map.tokenize(text)?;
            let encoded = encode(&symbols, &codes)?;
            let decoded_symbols = decode(&encoded, &tree)?;
            let decoded: String = decoded_symbols.iter().map(Symbol::as_str).collect();
            let round_trip_ok = decoded_symbols == symbols;
            if !round_trip_ok {
                tracing::warn!(input = text, decoded = %decoded, "round trip mismatch");
            }

            Some(MessageReport {
                text: text.to_string(),
                compression_ratio: statistics.compression_ratio(symbols.len(), encoded.len()),
                symbols,
                encoded,
                decoded,
                round_trip_ok,
            })
        }
        None => None,
    };

    Ok(Report {
        probabilities: map.entries().to_vec(),
        codes,
        merge_steps,
        statistics,
        layout: layout(&tree),
        message,
        tree,
    })
}

fn symbol_or_node(symbol: Option<&Symbol>) -> String {
    match symbol {
        Some(s) => s.to_string(),
        None => "(node)".to_string(),
    }
}

impl Report {
    /// Human-readable report.
    ///
    /// Entropy and average length are shown to 4 decimals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        // Writing to a String cannot fail
        let _ = writeln!(out, "=== Codes ===");
        for entry in &self.probabilities {
            let code = self
                .codes
                .get(&entry.symbol)
                .map(ToString::to_string)
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{:<8} p={:<8} {}",
                entry.symbol.to_string(),
                entry.probability,
                code
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "=== Merge Steps ===");
        for (i, step) in self.merge_steps.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}: {} ({}) + {} ({}) -> {}",
                i + 1,
                symbol_or_node(step.left_symbol.as_ref()),
                step.left_probability,
                symbol_or_node(step.right_symbol.as_ref()),
                step.right_probability,
                step.merged_probability,
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "=== Tree ===");
        out.push_str(&render_tree(&self.tree));

        let _ = writeln!(out);
        let _ = writeln!(out, "=== Statistics ===");
        let _ = writeln!(out, "Entropy: {:.4} bits/symbol", self.statistics.entropy);
        let _ = writeln!(
            out,
            "Average length: {:.4} bits/symbol",
            self.statistics.average_length
        );
        let _ = writeln!(out, "Efficiency: {:.2}%", self.statistics.efficiency * 100.0);

        if let Some(message) = &self.message {
            let _ = writeln!(out);
            let _ = writeln!(out, "=== Message ===");
            let _ = writeln!(out, "Message: {}", message.text);
            let _ = writeln!(out, "Encoded: {}", message.encoded);
            let _ = writeln!(out, "Decoded: {}", message.decoded);
            let _ = writeln!(
                out,
                "Bits: {} ({:.1}% of fixed-length)",
                message.encoded.len(),
                message.compression_ratio * 100.0
            );
            let verdict = if message.round_trip_ok { "PASSED" } else { "FAILED" };
            let _ = writeln!(out, "Round trip: {}", verdict);
        }

        out
    }
}

/// Indented outline of the tree, one node per line, `L`/`R` for the edge.
fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize, "root")];

    while let Some((node, depth, edge)) = stack.pop() {
        let indent = "  ".repeat(depth);
        let _ = match node {
            TreeNode::Leaf {
                symbol,
                probability,
            } => writeln!(out, "{indent}{edge}-> {symbol} [{probability}]"),
            TreeNode::Internal { probability, .. } => {
                writeln!(out, "{indent}{edge}-> [{probability}]")
            }
        };

        if let Some(right) = node.right() {
            stack.push((right, depth + 1, "R"));
        }
        if let Some(left) = node.left() {
            stack.push((left, depth + 1, "L"));
        }
    }

    out
}
