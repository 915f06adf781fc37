//! Token abstraction module.
//!
//! Tokens represent positions on the hash ring and must be comparable,
//! hashable, and thread-safe. One concrete type exists per server
//! partitioner.

pub mod byte_ordered;
pub mod murmur3;
pub mod random;
pub mod traits;

pub use byte_ordered::ByteOrderedToken;
pub use murmur3::Murmur3Token;
pub use random::RandomToken;
pub use traits::Token;
