//! Core library for client-side replica placement.
//!
//! This crate provides the fundamental abstractions shared by the
//! replication strategies:
//! - Token types and implementations
//! - Partitioner algorithms (key to token)
//! - Node identity and topology labels
//! - The immutable token ring snapshot and its token ranges

pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;

pub use error::{Error, Result};
pub use node::{Node, NodeId};
pub use partitioner::Partitioner;
pub use ring::{Ring, RingBuilder, TokenRange};
pub use token::Token;
