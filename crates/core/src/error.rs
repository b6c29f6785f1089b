//! Error types for huffcode.
//!
//! Every operation returns a structured error rather than panicking. Each
//! variant carries enough context (symbol, position, count) to point at the
//! offending input.

use crate::alphabet::Symbol;
use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Validation: the input alphabet is unusable
/// - Structural: a tree handed to code generation or decoding is malformed
/// - UnknownSymbol: a message contains a symbol the code table lacks
/// - MalformedEncoding: a bit string does not end on a codeword boundary
/// - Domain: statistics requested over an invalid probability set
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input alphabet
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed tree
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    /// Message symbol with no codeword
    #[error("unknown symbol {symbol} at position {position}")]
    UnknownSymbol { symbol: Symbol, position: usize },

    /// Bit string that cannot be decoded against the tree
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] MalformedEncodingError),

    /// Statistics over an invalid distribution
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Alphabet validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// No symbols supplied
    #[error("alphabet is empty")]
    Empty,

    /// Parallel symbol/probability lists disagree in length
    #[error("length mismatch: {symbols} symbols but {probabilities} probabilities")]
    LengthMismatch { symbols: usize, probabilities: usize },

    /// Probability is zero, negative, NaN or infinite
    #[error("symbol {symbol} has invalid probability {probability}")]
    NonPositiveProbability { symbol: Symbol, probability: f64 },

    /// Same symbol supplied twice
    #[error("duplicate symbol {symbol} at positions {first} and {second}")]
    DuplicateSymbol {
        symbol: Symbol,
        first: usize,
        second: usize,
    },

    /// Probability token that is not a number
    #[error("cannot parse probability {token:?} at position {position}")]
    InvalidProbability { token: String, position: usize },
}

/// Tree shape errors.
///
/// `path` is the bit path from the root to the offending node, rendered as
/// `0`/`1` characters (empty for the root).
#[derive(Debug, Error, PartialEq)]
pub enum StructuralError {
    /// Internal node with one child
    #[error("internal node at path {path:?} has exactly one child")]
    SingleChild { path: String },

    /// Internal node with no children
    #[error("internal node at path {path:?} has no children")]
    NoChildren { path: String },

    /// Root is a leaf, so its code would be empty
    #[error("root is a bare leaf; single-symbol trees need a unary root")]
    LeafRoot,

    /// Two leaves carry the same symbol
    #[error("symbol {symbol} appears on more than one leaf")]
    DuplicateLeaf { symbol: Symbol },
}

/// Decode-time errors.
#[derive(Debug, Error, PartialEq)]
pub enum MalformedEncodingError {
    /// Input ended before the walk reached a leaf
    #[error("bit string ends mid-codeword after {consumed} bits ({pending} bits pending)")]
    IncompleteCode { consumed: usize, pending: usize },

    /// A bit selected a child slot that is empty
    #[error("bit {bit} at position {position} selects a missing child")]
    MissingChild { bit: u8, position: usize },

    /// Character other than '0' or '1' in a textual bit string
    #[error("invalid bit character {character:?} at position {position}")]
    InvalidBit { character: char, position: usize },
}

/// Statistics errors.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// log2 is undefined for this probability
    #[error("entropy undefined: symbol {symbol} has probability {probability}")]
    NonPositiveProbability { symbol: Symbol, probability: f64 },

    /// Probabilities do not add up to a usable total
    #[error("probability total {total} is not positive and finite")]
    InvalidTotal { total: f64 },

    /// Symbol in the distribution with no codeword
    #[error("symbol {symbol} has no code")]
    MissingCode { symbol: Symbol },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
