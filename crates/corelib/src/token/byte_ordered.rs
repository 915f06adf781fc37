//! Byte-ordered token implementation.

use crate::token::traits::Token;
use std::fmt;

/// Byte-ordered token: raw key bytes compared lexicographically.
///
/// The empty byte string is the minimum token.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ByteOrderedToken(pub Vec<u8>);

impl Token for ByteOrderedToken {
    fn min_value() -> Self {
        ByteOrderedToken(Vec::new())
    }
}

impl ByteOrderedToken {
    /// Creates a token directly from bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        ByteOrderedToken(bytes.into())
    }
}

impl fmt::Display for ByteOrderedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}
