//! Bit and bit-string value types.
//!
//! Codes and encoded messages are ordered sequences of bits. They are kept
//! unpacked (one `Bit` per element) and carry a textual `"0101"` form for the
//! front end; packing into bytes is a container concern this crate does not
//! have.

use crate::error::{Error, MalformedEncodingError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

/// Ordered sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<Bit>,
}

impl BitString {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bit: Bit) {
        self.bits.push(bit);
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.bits.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    /// True if `self` is a prefix of `other` (including equality).
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl FromIterator<Bit> for BitString {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = Error;

    /// Parse a string of `'0'`/`'1'` characters.
    ///
    /// # Errors
    /// `MalformedEncodingError::InvalidBit` for any other character.
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(Bit::Zero),
                '1' => Ok(Bit::One),
                _ => Err(Error::from(MalformedEncodingError::InvalidBit {
                    character,
                    position,
                })),
            })
            .collect()
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let bits: BitString = "01101".parse().unwrap();
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.to_string(), "01101");
        assert_eq!(
            bits.iter().map(Bit::as_u8).collect::<Vec<_>>(),
            vec![0, 1, 1, 0, 1]
        );
    }

    #[test]
    fn test_empty() {
        let bits: BitString = "".parse().unwrap();
        assert!(bits.is_empty());
        assert_eq!(bits.to_string(), "");
    }

    #[test]
    fn test_invalid_character() {
        let err = "01a1".parse::<BitString>().unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedEncoding(MalformedEncodingError::InvalidBit {
                character: 'a',
                position: 2
            })
        ));
    }

    #[test]
    fn test_prefix() {
        let short: BitString = "01".parse().unwrap();
        let long: BitString = "011".parse().unwrap();
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(short.is_prefix_of(&short));
    }

    #[test]
    fn test_extend() {
        let mut bits: BitString = "1".parse().unwrap();
        bits.extend_from(&"00".parse().unwrap());
        bits.push(Bit::from(true));
        assert_eq!(bits.to_string(), "1001");
    }

    #[test]
    fn test_serialize_as_text() {
        let bits: BitString = "10".parse().unwrap();
        assert_eq!(serde_json::to_string(&bits).unwrap(), "\"10\"");
    }
}
