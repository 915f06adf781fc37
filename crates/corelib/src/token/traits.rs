//! Core token trait definitions.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Minimal token trait for the hash ring.
///
/// Tokens are immutable, totally ordered positions; the `Ord` implementation
/// *is* the ring order. Implementations must be thread-safe and cheap to
/// compare and hash.
pub trait Token: Clone + Ord + Hash + Send + Sync + Debug + Display + 'static {
    /// Minimum token value (start of ring).
    fn min_value() -> Self;

    /// True if this token is the minimum.
    fn is_min(&self) -> bool {
        *self == Self::min_value()
    }
}
