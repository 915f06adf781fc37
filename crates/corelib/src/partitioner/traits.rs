//! Core partitioner trait definitions.

use crate::error::Result;
use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// token generation without synchronization overhead. Each one must agree
/// bit-for-bit with the server partitioner of the same name, otherwise
/// token-aware routing picks the wrong replicas.
pub trait Partitioner: Send + Sync + 'static {
    /// The token type produced by this partitioner.
    type TokenType: Token;

    /// Converts a routing key into a token.
    fn partition(&self, key: &[u8]) -> Self::TokenType;

    /// Parses the textual token form found in cluster metadata.
    fn parse_token(&self, value: &str) -> Result<Self::TokenType>;

    /// Returns the minimum token value for this partitioner.
    fn min_token(&self) -> Self::TokenType {
        Self::TokenType::min_value()
    }

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
