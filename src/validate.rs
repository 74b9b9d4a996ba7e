//! Input validation for key material
//!
//! Operator-supplied key, nonce and tag arrive as hex strings. Each one is
//! decoded and length-checked here so malformed material never reaches the
//! cipher. Checks short-circuit: decode, then length, then cipher setup.

use crate::crypto::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use std::fmt;
use zeroize::Zeroizing;

/// Which piece of key material a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Nonce,
    Tag,
}

impl Field {
    /// Required decoded length in bytes
    pub fn expected_len(self) -> usize {
        match self {
            Field::Key => KEY_SIZE,
            Field::Nonce => NONCE_SIZE,
            Field::Tag => TAG_SIZE,
        }
    }

    /// Required length in hex characters
    pub fn hex_len(self) -> usize {
        self.expected_len() * 2
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Key => "key",
            Field::Nonce => "nonce",
            Field::Tag => "tag",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `buffer` is exactly `expected` bytes long
pub fn check_length(buffer: &[u8], expected: usize, field: Field) -> Result<()> {
    if buffer.len() != expected {
        return Err(Error::Length {
            field,
            expected,
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// Decode a hex string into bytes
///
/// Accepts upper or lower case. Odd-length input or any non-hex character
/// fails with `Encoding`.
pub fn decode_hex(field: Field, input: &str) -> Result<Zeroizing<Vec<u8>>> {
    hex::decode(input)
        .map(Zeroizing::new)
        .map_err(|source| Error::Encoding { field, source })
}

/// Decode a hex string and check it has the length `field` requires
pub fn decode_field(field: Field, input: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = decode_hex(field, input)?;
    check_length(&bytes, field.expected_len(), field)?;
    Ok(bytes)
}
