//! Random partitioner token implementation.

use crate::token::traits::Token;
use std::fmt;

/// Random partitioner token: the absolute value of an MD5 digest, so the
/// space is `0..=2^127`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RandomToken(pub u128);

/// Largest value an MD5-derived token can take.
pub const RANDOM_TOKEN_MAX: u128 = 1 << 127;

impl Token for RandomToken {
    fn min_value() -> Self {
        RandomToken(0)
    }
}

impl fmt::Display for RandomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
