//! Alphabet model: symbols and their probabilities.
//!
//! A [`ProbabilityMap`] is the validated input to tree construction. It keeps
//! symbols in insertion order, because that order decides how equal
//! probabilities are merged.
//!
//! # Validation Rules
//! - at least one symbol
//! - every probability finite and strictly positive
//! - no symbol appears twice
//!
//! The probabilities do not need to sum to exactly 1.0.
//!
//! # Example
//! ```
//! use huffcode_core::alphabet::ProbabilityMap;
//!
//! let map = ProbabilityMap::parse_lists("a,b,c", "0.5, 0.25, 0.25").unwrap();
//! assert_eq!(map.len(), 3);
//! let message = map.tokenize("abca").unwrap();
//! assert_eq!(message.len(), 4);
//! ```

use crate::error::{Error, Result, ValidationError};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// An opaque token of the input alphabet.
///
/// Usually a single character, but any string works, including the empty
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

/// One symbol and its probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub symbol: Symbol,
    pub probability: f64,
}

/// Validated mapping from symbol to probability, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMap {
    entries: Vec<Entry>,
    index: HashMap<Symbol, usize>,
}

impl ProbabilityMap {
    /// Build a map from parallel sequences of symbols and probabilities.
    ///
    /// # Errors
    /// - `ValidationError::LengthMismatch` if the sequences differ in length
    /// - `ValidationError::Empty` if both are empty
    /// - `ValidationError::NonPositiveProbability` for p <= 0, NaN or infinity
    /// - `ValidationError::DuplicateSymbol` if a symbol repeats
    pub fn from_parallel<S, I, P>(symbols: I, probabilities: P) -> Result<Self>
    where
        S: Into<Symbol>,
        I: IntoIterator<Item = S>,
        P: IntoIterator<Item = f64>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        let probabilities: Vec<f64> = probabilities.into_iter().collect();

        if symbols.len() != probabilities.len() {
            return Err(ValidationError::LengthMismatch {
                symbols: symbols.len(),
                probabilities: probabilities.len(),
            }
            .into());
        }

        Self::from_pairs(symbols.into_iter().zip(probabilities))
    }

    /// Build a map from `(symbol, probability)` pairs.
    pub fn from_pairs<S, I>(pairs: I) -> Result<Self>
    where
        S: Into<Symbol>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (position, (symbol, probability)) in pairs.into_iter().enumerate() {
            let symbol = symbol.into();

            if !probability.is_finite() || probability <= 0.0 {
                return Err(ValidationError::NonPositiveProbability {
                    symbol,
                    probability,
                }
                .into());
            }

            if let Some(&first) = index.get(&symbol) {
                return Err(ValidationError::DuplicateSymbol {
                    symbol,
                    first,
                    second: position,
                }
                .into());
            }

            index.insert(symbol.clone(), position);
            entries.push(Entry {
                symbol,
                probability,
            });
        }

        if entries.is_empty() {
            return Err(ValidationError::Empty.into());
        }

        Ok(Self { entries, index })
    }

    /// Parse the comma-separated form used by the front end.
    ///
    /// Symbol tokens are taken verbatim (a space is a valid symbol), while
    /// probability tokens are trimmed before parsing.
    ///
    /// # Errors
    /// `ValidationError::InvalidProbability` names the first token that is not
    /// a number; everything else is validated as in [`Self::from_parallel`].
    pub fn parse_lists(symbols: &str, probabilities: &str) -> Result<Self> {
        if symbols.is_empty() && probabilities.trim().is_empty() {
            return Err(ValidationError::Empty.into());
        }

        let symbols: Vec<&str> = symbols.split(',').collect();
        let probabilities = probabilities
            .split(',')
            .enumerate()
            .map(|(position, token)| {
                let token = token.trim();
                token
                    .parse::<f64>()
                    .map_err(|_| ValidationError::InvalidProbability {
                        token: token.to_string(),
                        position,
                    })
            })
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        Self::from_parallel(symbols, probabilities)
    }

    /// Number of symbols (always at least one).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed map; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Probability of `symbol`, if present.
    pub fn get(&self, symbol: &Symbol) -> Option<f64> {
        self.index.get(symbol).map(|&i| self.entries[i].probability)
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    /// Split `text` into alphabet symbols.
    ///
    /// Any split into symbols is found, even when the longest symbol at some
    /// offset leads to a dead end. Among valid splits, the longest symbol at
    /// each offset wins. Empty symbols never match. Positions in errors are
    /// character offsets.
    ///
    /// # Errors
    /// `Error::UnknownSymbol` carrying the character at the furthest offset
    /// any sequence of symbols reaches, when no split exists.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Symbol>> {
        let mut candidates: Vec<&Symbol> = self
            .entries
            .iter()
            .map(|e| &e.symbol)
            .filter(|s| !s.as_str().is_empty())
            .collect();
        // Longest first so "ab" wins over "a"
        candidates.sort_by(|a, b| b.as_str().len().cmp(&a.as_str().len()));

        let len = text.len();

        // choice[i]: longest symbol at byte offset i whose end can still be split
        let mut choice: Vec<Option<&Symbol>> = vec![None; len + 1];
        let mut completes = vec![false; len + 1];
        completes[len] = true;

        for offset in (0..len).rev() {
            if !text.is_char_boundary(offset) {
                continue;
            }
            let rest = &text[offset..];
            choice[offset] = candidates
                .iter()
                .copied()
                .find(|s| rest.starts_with(s.as_str()) && completes[offset + s.as_str().len()]);
            completes[offset] = choice[offset].is_some();
        }

        if completes[0] {
            let mut out = Vec::new();
            let mut offset = 0;
            while let Some(symbol) = choice[offset] {
                out.push(symbol.clone());
                offset += symbol.as_str().len();
            }
            return Ok(out);
        }

        let furthest = furthest_reachable(text, &candidates);
        let unknown = text[furthest..]
            .chars()
            .next()
            .map(Symbol::from)
            .unwrap_or_default();
        Err(Error::UnknownSymbol {
            symbol: unknown,
            position: text[..furthest].chars().count(),
        })
    }
}

/// Largest byte offset below `text.len()` that some sequence of
/// `candidates` reaches from the start.
fn furthest_reachable(text: &str, candidates: &[&Symbol]) -> usize {
    let mut reached = vec![false; text.len() + 1];
    reached[0] = true;
    let mut furthest = 0;

    for offset in 0..text.len() {
        if !reached[offset] {
            continue;
        }
        furthest = offset;
        let rest = &text[offset..];
        for symbol in candidates.iter().filter(|s| rest.starts_with(s.as_str())) {
            reached[offset + symbol.as_str().len()] = true;
        }
    }

    furthest
}

impl<'a> IntoIterator for &'a ProbabilityMap {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
