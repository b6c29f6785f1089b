//! Sample input generation.
//!
//! When no alphabet is given on the command line we generate one: a few
//! single-character symbols with skewed random probabilities, plus a message
//! drawn from that same distribution so the encoded length reflects the
//! code's efficiency.
//!
//! Everything is driven by a seeded ChaCha8 RNG, so a seed reproduces the
//! exact same sample.

use huffcode_core::{Error, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Characters generated alphabets draw their symbols from, in order.
pub const SYMBOL_POOL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A generated alphabet and message, in command-line form.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Comma-separated symbols
    pub symbols: String,
    /// Comma-separated probabilities (4 decimals, summing to about 1)
    pub probabilities: String,
    pub message: String,
}

/// Generate a sample alphabet of `alphabet_size` symbols and a message of
/// `message_len` symbols.
///
/// # Errors
/// `Error::Config` if `alphabet_size` is 0 or larger than [`SYMBOL_POOL`].
pub fn generate_sample(seed: u64, alphabet_size: usize, message_len: usize) -> Result<Sample> {
    if alphabet_size == 0 || alphabet_size > SYMBOL_POOL.len() {
        return Err(Error::Config(format!(
            "alphabet size {} outside 1..={}",
            alphabet_size,
            SYMBOL_POOL.len()
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let symbols: Vec<char> = SYMBOL_POOL[..alphabet_size]
        .iter()
        .map(|&b| b as char)
        .collect();

    // Squared weights skew the distribution so code lengths differ
    let weights: Vec<u32> = (0..alphabet_size)
        .map(|_| {
            let w: u32 = rng.gen_range(1..=10);
            w * w
        })
        .collect();
    let total: u32 = weights.iter().sum();

    let probabilities: Vec<f64> = weights
        .iter()
        .map(|&w| ((f64::from(w) / f64::from(total)) * 10_000.0).round().max(1.0) / 10_000.0)
        .collect();

    let dist = WeightedIndex::new(&weights)
        .map_err(|e| Error::Config(format!("cannot sample message: {e}")))?;
    let message: String = (0..message_len).map(|_| symbols[dist.sample(&mut rng)]).collect();

    Ok(Sample {
        symbols: join(symbols.iter()),
        probabilities: join(probabilities.iter()),
        message,
    })
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use huffcode_core::ProbabilityMap;

    #[test]
    fn test_generate_sample() {
        let sample = generate_sample(42, 6, 30).unwrap();
        let map = ProbabilityMap::parse_lists(&sample.symbols, &sample.probabilities).unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(sample.message.chars().count(), 30);
        assert!(map.tokenize(&sample.message).is_ok());
        assert!((map.total() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_determinism() {
        let sample1 = generate_sample(12345, 8, 50).unwrap();
        let sample2 = generate_sample(12345, 8, 50).unwrap();

        assert_eq!(sample1, sample2);
    }

    #[test]
    fn test_different_seeds() {
        let sample1 = generate_sample(1, 10, 100).unwrap();
        let sample2 = generate_sample(2, 10, 100).unwrap();

        assert_ne!(sample1, sample2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [1, 2, 5, 26, SYMBOL_POOL.len()] {
            let sample = generate_sample(999, size, 10).unwrap();
            let map = ProbabilityMap::parse_lists(&sample.symbols, &sample.probabilities).unwrap();
            assert_eq!(map.len(), size);
        }
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(generate_sample(0, 0, 10).is_err());
        assert!(generate_sample(0, SYMBOL_POOL.len() + 1, 10).is_err());
    }

    #[test]
    fn test_empty_message() {
        let sample = generate_sample(5, 3, 0).unwrap();
        assert!(sample.message.is_empty());
    }
}
