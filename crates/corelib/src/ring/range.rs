//! Token ranges owned by ring entries.

use crate::token::Token;
use std::fmt;

/// A `(start, end]` slice of the ring.
///
/// The range owned by a ring token starts just after the previous ring
/// token. The first range wraps around the end of the ring, and a ring with
/// a single token owns everything (`start == end`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenRange<T: Token> {
    pub start: T,
    pub end: T,
}

impl<T: Token> TokenRange<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// True if this range crosses the end of the ring.
    pub fn is_wrapped_around(&self) -> bool {
        self.start > self.end
    }

    /// True if this range covers the whole ring.
    pub fn is_full_ring(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, token: &T) -> bool {
        if self.is_full_ring() {
            true
        } else if self.is_wrapped_around() {
            *token > self.start || *token <= self.end
        } else {
            *token > self.start && *token <= self.end
        }
    }
}

impl<T: Token> fmt::Display for TokenRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Murmur3Token as M;

    #[test]
    fn test_contains_regular_range() {
        let range = TokenRange::new(M(10), M(20));
        assert!(!range.contains(&M(10)));
        assert!(range.contains(&M(11)));
        assert!(range.contains(&M(20)));
        assert!(!range.contains(&M(21)));
    }

    #[test]
    fn test_contains_wrapped_range() {
        let range = TokenRange::new(M(20), M(-5));
        assert!(range.is_wrapped_around());
        assert!(range.contains(&M(21)));
        assert!(range.contains(&M(i64::MIN)));
        assert!(range.contains(&M(-5)));
        assert!(!range.contains(&M(0)));
    }

    #[test]
    fn test_full_ring() {
        let range = TokenRange::new(M(3), M(3));
        assert!(range.is_full_ring());
        assert!(range.contains(&M(-100)));
        assert!(range.contains(&M(3)));
    }
}
