//! Reporting statistics for a probability model and its code table.
//!
//! Nothing here feeds back into construction; the numbers exist so a front
//! end can show how close the code is to the entropy bound.
//!
//! # Normalization
//!
//! Probabilities are divided by their total before use. When the input
//! already sums to 1.0 this changes nothing; when it does not (raw counts,
//! say), the figures still describe the distribution the weights imply and
//! `average_length >= entropy` continues to hold.

use crate::alphabet::ProbabilityMap;
use crate::codes::CodeTable;
use crate::error::{DomainError, Result};
use serde::Serialize;

/// Entropy and code-length figures for one alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Shannon entropy in bits per symbol
    pub entropy: f64,

    /// Expected code length in bits per symbol
    pub average_length: f64,

    /// entropy / average_length, in (0, 1]
    pub efficiency: f64,

    /// average_length - entropy
    pub redundancy: f64,

    /// Number of symbols in the alphabet
    pub symbol_count: usize,

    /// Bits per symbol of a fixed-length code for the same alphabet
    pub fixed_length_bits: usize,

    /// Longest code in the table
    pub max_code_length: usize,
}

impl Statistics {
    /// Ratio of `encoded_bits` to what a fixed-length code would need for
    /// `message_symbols` symbols.
    ///
    /// Returns 0.0 for an empty message.
    pub fn compression_ratio(&self, message_symbols: usize, encoded_bits: usize) -> f64 {
        let fixed = message_symbols * self.fixed_length_bits;
        if fixed == 0 {
            0.0
        } else {
            encoded_bits as f64 / fixed as f64
        }
    }
}

/// Bits needed to give each of `n` symbols a distinct fixed-length code.
fn fixed_length_bits(n: usize) -> usize {
    if n <= 2 {
        1
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

/// Shannon entropy `H = -Σ p·log2(p)` of the normalized distribution.
///
/// # Errors
/// `DomainError` if a probability is not positive and finite or the total
/// is unusable.
pub fn entropy(map: &ProbabilityMap) -> Result<f64> {
    let total = checked_total(map)?;
    Ok(map
        .iter()
        .map(|e| {
            let p = e.probability / total;
            p * (1.0 / p).log2()
        })
        .sum())
}

/// Expected code length `L = Σ p·len(code)` of the normalized distribution.
///
/// # Errors
/// `DomainError::MissingCode` if a symbol of `map` has no code in `table`.
pub fn average_length(map: &ProbabilityMap, table: &CodeTable) -> Result<f64> {
    let total = checked_total(map)?;
    let mut sum = 0.0;
    for entry in map {
        let code = table.get(&entry.symbol).ok_or_else(|| DomainError::MissingCode {
            symbol: entry.symbol.clone(),
        })?;
        sum += entry.probability / total * code.len() as f64;
    }
    Ok(sum)
}

/// Compute every figure in [`Statistics`].
pub fn compute_statistics(map: &ProbabilityMap, table: &CodeTable) -> Result<Statistics> {
    let entropy = entropy(map)?;
    let average_length = average_length(map, table)?;

    let stats = Statistics {
        entropy,
        average_length,
        efficiency: if average_length > 0.0 {
            entropy / average_length
        } else {
            0.0
        },
        redundancy: average_length - entropy,
        symbol_count: map.len(),
        fixed_length_bits: fixed_length_bits(map.len()),
        max_code_length: table.max_length(),
    };

    tracing::debug!(
        entropy = stats.entropy,
        average_length = stats.average_length,
        "computed statistics"
    );
    Ok(stats)
}

fn checked_total(map: &ProbabilityMap) -> Result<f64> {
    for entry in map {
        if !entry.probability.is_finite() || entry.probability <= 0.0 {
            return Err(DomainError::NonPositiveProbability {
                symbol: entry.symbol.clone(),
                probability: entry.probability,
            }
            .into());
        }
    }

    let total = map.total();
    if !total.is_finite() || total <= 0.0 {
        return Err(DomainError::InvalidTotal { total }.into());
    }
    Ok(total)
}
