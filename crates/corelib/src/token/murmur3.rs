//! Murmur3 token implementation (Cassandra-compatible).

use crate::token::traits::Token;
use std::fmt;

/// Murmur3 token: a signed 64-bit position, ordered as a signed integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Murmur3Token(pub i64);

impl Token for Murmur3Token {
    fn min_value() -> Self {
        Murmur3Token(i64::MIN)
    }
}

impl fmt::Display for Murmur3Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Murmur3Token {
    fn from(value: i64) -> Self {
        Murmur3Token(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_ordering() {
        assert!(Murmur3Token(-5) < Murmur3Token(3));
        assert!(Murmur3Token::min_value().is_min());
        assert!(!Murmur3Token(0).is_min());
    }
}
