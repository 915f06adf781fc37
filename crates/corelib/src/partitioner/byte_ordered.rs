//! Byte-ordered partitioner implementation.

use crate::error::{Error, Result};
use crate::partitioner::traits::Partitioner;
use crate::token::byte_ordered::ByteOrderedToken;

/// Byte-ordered partitioner: the token is the key itself.
#[derive(Clone, Debug, Default)]
pub struct ByteOrderedPartitioner;

impl Partitioner for ByteOrderedPartitioner {
    type TokenType = ByteOrderedToken;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        ByteOrderedToken::from_bytes(key)
    }

    /// Tokens are written as hex, with or without a `0x` prefix.
    fn parse_token(&self, value: &str) -> Result<Self::TokenType> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex::decode(digits)
            .map(ByteOrderedToken)
            .map_err(|e| Error::invalid_token(self.name(), value, e))
    }

    fn name(&self) -> &'static str {
        "ByteOrderedPartitioner"
    }
}
