//! Message encoding and decoding.
//!
//! Encoding concatenates codes from a [`CodeTable`]. Decoding walks the tree
//! one bit at a time from the root (`0` = left, `1` = right), emitting a
//! symbol and returning to the root at every leaf. Whether a node is a leaf
//! is decided by its variant, never by the value of its symbol, so an empty
//! string is a perfectly decodable symbol.
//!
//! For any message over the table's alphabet,
//! `decode(&encode(m, &table)?, &root)? == m`.

use crate::alphabet::Symbol;
use crate::bits::BitString;
use crate::codes::CodeTable;
use crate::error::{Error, MalformedEncodingError, Result, StructuralError};
use crate::tree::TreeNode;

/// Encode `message` with `table`.
///
/// # Errors
/// `Error::UnknownSymbol` naming the first symbol without a code and its
/// index in `message`.
pub fn encode(message: &[Symbol], table: &CodeTable) -> Result<BitString> {
    let lookup = |position: usize, symbol: &Symbol| {
        table.get(symbol).ok_or_else(|| Error::UnknownSymbol {
            symbol: symbol.clone(),
            position,
        })
    };

    // Reserve the exact output size
    let total = message
        .iter()
        .enumerate()
        .map(|(position, symbol)| lookup(position, symbol).map(BitString::len))
        .sum::<Result<usize>>()?;

    let mut out = BitString::with_capacity(total);
    for (position, symbol) in message.iter().enumerate() {
        out.extend_from(lookup(position, symbol)?);
    }

    tracing::debug!(symbols = message.len(), bits = out.len(), "encoded message");
    Ok(out)
}

/// Decode `bits` by walking the tree rooted at `root`.
///
/// # Errors
/// - `StructuralError::LeafRoot` if `root` is a bare leaf
/// - `MalformedEncodingError::MissingChild` if a bit selects an empty slot
/// - `MalformedEncodingError::IncompleteCode` if the input ends mid-walk
pub fn decode(bits: &BitString, root: &TreeNode) -> Result<Vec<Symbol>> {
    if root.is_leaf() {
        return Err(StructuralError::LeafRoot.into());
    }

    let mut out = Vec::new();
    let mut current = root;
    let mut pending = 0;

    for (position, bit) in bits.iter().enumerate() {
        let next = current
            .child(bit)
            .ok_or(MalformedEncodingError::MissingChild {
                bit: bit.as_u8(),
                position,
            })?;

        match next {
            TreeNode::Leaf { symbol, .. } => {
                out.push(symbol.clone());
                current = root;
                pending = 0;
            }
            TreeNode::Internal { .. } => {
                current = next;
                pending += 1;
            }
        }
    }

    if pending > 0 {
        return Err(MalformedEncodingError::IncompleteCode {
            consumed: bits.len(),
            pending,
        }
        .into());
    }

    tracing::debug!(bits = bits.len(), symbols = out.len(), "decoded message");
    Ok(out)
}
