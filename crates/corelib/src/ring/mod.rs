//! Token ring snapshot.
//!
//! The ring is an immutable, sorted view of every token in the cluster and
//! its primary owner. Topology changes produce a new ring through
//! [`RingBuilder`]; nothing mutates an existing one, so strategies can walk
//! it from any number of threads.

pub mod range;
pub mod ring;

pub use range::TokenRange;
pub use ring::{Ring, RingBuilder, RingWalk, DEFAULT_VNODES};
