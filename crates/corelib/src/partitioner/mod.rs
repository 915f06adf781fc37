//! Partitioner abstraction.
//!
//! Partitioners are responsible for converting routing keys into tokens
//! that can be located on the hash ring.

pub mod byte_ordered;
pub mod murmur3;
pub mod random;
pub mod traits;

pub use byte_ordered::ByteOrderedPartitioner;
pub use murmur3::Murmur3Partitioner;
pub use random::RandomPartitioner;
pub use traits::Partitioner;
