//! Random partitioner implementation.

use crate::error::{Error, Result};
use crate::partitioner::traits::Partitioner;
use crate::token::random::{RandomToken, RANDOM_TOKEN_MAX};

/// Random partitioner: MD5 digest read as a signed 128-bit big-endian
/// integer, absolute value.
#[derive(Clone, Debug, Default)]
pub struct RandomPartitioner;

impl Partitioner for RandomPartitioner {
    type TokenType = RandomToken;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        let digest = md5::compute(key);
        RandomToken(i128::from_be_bytes(digest.0).unsigned_abs())
    }

    fn parse_token(&self, value: &str) -> Result<Self::TokenType> {
        let parsed = value
            .trim()
            .parse::<u128>()
            .map_err(|e| Error::invalid_token(self.name(), value, e))?;
        if parsed > RANDOM_TOKEN_MAX {
            return Err(Error::invalid_token(self.name(), value, "exceeds 2^127"));
        }
        Ok(RandomToken(parsed))
    }

    fn name(&self) -> &'static str {
        "RandomPartitioner"
    }
}
