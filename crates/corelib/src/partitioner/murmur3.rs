//! Murmur3 partitioner implementation.
//!
//! Cassandra hashes partition keys with its own variant of MurmurHash3
//! x64/128 (seed 0): tail bytes are sign-extended before mixing. Only the
//! first 64-bit half of the digest becomes the token. The hash itself comes
//! from `cassandra-protocol`, which reproduces the server's variant.

use crate::error::{Error, Result};
use crate::partitioner::traits::Partitioner;
use crate::token::murmur3::Murmur3Token;
use cassandra_protocol::token::Murmur3Token as ProtocolToken;

/// Murmur3 partitioner (Cassandra-compatible).
#[derive(Clone, Debug, Default)]
pub struct Murmur3Partitioner;

impl Partitioner for Murmur3Partitioner {
    type TokenType = Murmur3Token;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        let h1 = ProtocolToken::generate(key).value;
        // i64::MIN is reserved as the ring minimum.
        if h1 == i64::MIN {
            Murmur3Token(i64::MAX)
        } else {
            Murmur3Token(h1)
        }
    }

    fn parse_token(&self, value: &str) -> Result<Self::TokenType> {
        value
            .trim()
            .parse::<i64>()
            .map(Murmur3Token)
            .map_err(|e| Error::invalid_token(self.name(), value, e))
    }

    fn name(&self) -> &'static str {
        "Murmur3Partitioner"
    }
}
