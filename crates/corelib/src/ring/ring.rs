//! Token ring data structure and builder.
//!
//! # Layout
//!
//! The ring is a single `Vec<(Token, Arc<Node>)>` sorted by token. Circular
//! traversal is modular indexing over that vector, so stepping to the next
//! entry is O(1) and there are no reference cycles:
//!
//! ```text
//!   index:   0      1      2      3
//!   token:  -90    -10     40     75   --> wraps back to index 0
//!   owner:   A      B      A      C
//! ```
//!
//! All entries owned by the same node share one `Arc<Node>`.

use crate::error::{Error, Result};
use crate::node::{Node, NodeId};
use crate::partitioner::{Murmur3Partitioner, Partitioner};
use crate::ring::range::TokenRange;
use crate::token::{Murmur3Token, Token};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Default number of virtual nodes per physical node for generated rings.
pub const DEFAULT_VNODES: usize = 256;

/// Immutable, sorted snapshot of the token ring.
///
/// # Invariants
///
/// - Tokens are unique and sorted ascending
/// - Every token has exactly one primary owner
/// - Walking past the last entry continues at the first
#[derive(Debug, Clone)]
pub struct Ring<T: Token> {
    entries: Vec<(T, Arc<Node>)>,
}

impl<T: Token> Default for Ring<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Token> Ring<T> {
    /// Start building a new ring snapshot.
    pub fn builder() -> RingBuilder<T> {
        RingBuilder::new()
    }

    /// Number of tokens on the ring.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All `(token, primary owner)` pairs in ring order.
    pub fn entries(&self) -> &[(T, Arc<Node>)] {
        &self.entries
    }

    /// All tokens in ring order.
    pub fn tokens(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(token, _)| token)
    }

    /// Token at `index`, wrapping around the ring.
    pub fn token_at(&self, index: usize) -> Option<&T> {
        self.entry_at(index).map(|(token, _)| token)
    }

    /// Primary owner of the token at `index`, wrapping around the ring.
    pub fn primary(&self, index: usize) -> Option<&Arc<Node>> {
        self.entry_at(index).map(|(_, node)| node)
    }

    fn entry_at(&self, index: usize) -> Option<&(T, Arc<Node>)> {
        if self.entries.is_empty() {
            None
        } else {
            self.entries.get(index % self.entries.len())
        }
    }

    /// Position of a token that is on the ring.
    pub fn index_of(&self, token: &T) -> Option<usize> {
        self.entries.binary_search_by(|(t, _)| t.cmp(token)).ok()
    }

    /// Position of the ring token owning an arbitrary token: the first ring
    /// token greater than or equal to it, wrapping to the first entry.
    ///
    /// # Performance
    /// - **Time**: O(log n) binary search
    pub fn owner_index(&self, token: &T) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = self.entries.partition_point(|(t, _)| t < token);
        Some(if idx == self.entries.len() { 0 } else { idx })
    }

    /// Primary owner of an arbitrary token.
    pub fn owner_of(&self, token: &T) -> Option<&Arc<Node>> {
        self.owner_index(token).and_then(|idx| self.primary(idx))
    }

    /// Walk the ring clockwise once, starting at `start` (taken modulo the
    /// ring size). Every entry is visited exactly once.
    pub fn walk_from(&self, start: usize) -> RingWalk<'_, T> {
        let start = if self.entries.is_empty() {
            0
        } else {
            start % self.entries.len()
        };
        RingWalk {
            entries: &self.entries,
            start,
            step: 0,
        }
    }

    /// Distinct nodes on the ring, in the order their first token appears.
    pub fn nodes(&self) -> Vec<Arc<Node>> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|(_, node)| seen.insert(node.id))
            .map(|(_, node)| Arc::clone(node))
            .collect()
    }

    /// Number of distinct nodes on the ring.
    pub fn node_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| node.id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// The range owned by each ring token, in ring order.
    pub fn ranges(&self) -> Vec<(TokenRange<T>, Arc<Node>)> {
        let len = self.entries.len();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (end, node))| {
                let (start, _) = &self.entries[(i + len - 1) % len];
                (TokenRange::new(start.clone(), end.clone()), Arc::clone(node))
            })
            .collect()
    }
}

/// One clockwise revolution over the ring. See [`Ring::walk_from`].
#[derive(Debug, Clone)]
pub struct RingWalk<'a, T: Token> {
    entries: &'a [(T, Arc<Node>)],
    start: usize,
    step: usize,
}

impl<'a, T: Token> Iterator for RingWalk<'a, T> {
    type Item = (&'a T, &'a Arc<Node>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.entries.len() {
            return None;
        }
        let (token, node) = &self.entries[(self.start + self.step) % self.entries.len()];
        self.step += 1;
        Some((token, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.step;
        (remaining, Some(remaining))
    }
}

impl<T: Token> ExactSizeIterator for RingWalk<'_, T> {}

impl<T: Token> FusedIterator for RingWalk<'_, T> {}

/// Builder for ring snapshots.
///
/// Registering a token twice for the same node is idempotent. Registering
/// it for two different nodes is recorded and reported by [`build`], as is
/// registering one node id with different name or topology labels.
///
/// # Example
///
/// ```rust
/// use corelib::{Node, NodeId, Ring};
/// use corelib::token::Murmur3Token;
///
/// let ring = Ring::builder()
///     .add_token(Murmur3Token(-100), Node::new(NodeId(1), "node1"))
///     .add_token(Murmur3Token(100), Node::new(NodeId(2), "node2"))
///     .build()
///     .unwrap();
/// assert_eq!(ring.len(), 2);
/// ```
///
/// [`build`]: RingBuilder::build
#[derive(Debug)]
pub struct RingBuilder<T: Token> {
    tokens: BTreeMap<T, Arc<Node>>,
    nodes: HashMap<NodeId, Arc<Node>>,
    conflict: Option<Error>,
    vnodes: usize,
}

impl<T: Token> Default for RingBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> RingBuilder<T> {
    pub fn new() -> Self {
        Self {
            tokens: BTreeMap::new(),
            nodes: HashMap::new(),
            conflict: None,
            vnodes: DEFAULT_VNODES,
        }
    }

    fn shared(&mut self, node: Node) -> Arc<Node> {
        let existing = self.nodes.entry(node.id).or_insert_with(|| Arc::new(node.clone()));
        if **existing != node && self.conflict.is_none() {
            self.conflict = Some(Error::ConflictingNode {
                id: node.id.to_string(),
                existing: existing.to_string(),
                conflicting: node.to_string(),
            });
        }
        Arc::clone(existing)
    }

    /// Register `token` as owned by `node`.
    pub fn add_token(mut self, token: T, node: Node) -> Self {
        let node = self.shared(node);
        self.insert(token, node);
        self
    }

    /// Register every token in `tokens` as owned by `node`.
    pub fn add_tokens(mut self, node: Node, tokens: impl IntoIterator<Item = T>) -> Self {
        let node = self.shared(node);
        for token in tokens {
            self.insert(token, Arc::clone(&node));
        }
        self
    }

    fn insert(&mut self, token: T, node: Arc<Node>) {
        match self.tokens.get(&token) {
            Some(existing) if existing.id != node.id => {
                if self.conflict.is_none() {
                    self.conflict = Some(Error::DuplicateToken {
                        token: token.to_string(),
                        existing: existing.id.to_string(),
                        conflicting: node.id.to_string(),
                    });
                }
            }
            Some(_) => {}
            None => {
                self.tokens.insert(token, node);
            }
        }
    }

    /// Finish the snapshot.
    ///
    /// # Errors
    /// [`Error::DuplicateToken`] if two nodes claimed the same token, or
    /// [`Error::ConflictingNode`] if one node id came with different labels.
    /// The first conflict recorded is reported.
    pub fn build(self) -> Result<Ring<T>> {
        if let Some(conflict) = self.conflict {
            return Err(conflict);
        }
        // BTreeMap iteration is already sorted.
        Ok(Ring {
            entries: self.tokens.into_iter().collect(),
        })
    }
}

impl RingBuilder<Murmur3Token> {
    /// Set the number of vnodes used by [`add_node`](Self::add_node).
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.vnodes = vnodes;
        self
    }

    /// Add a node with the default vnode count.
    pub fn add_node(self, node: Node) -> Self {
        let vnodes = self.vnodes;
        self.add_node_with_vnodes(node, vnodes)
    }

    /// Add a node owning `vnodes` tokens derived by hashing
    /// `"<node_id>:<vnode_index>"`.
    pub fn add_node_with_vnodes(self, node: Node, vnodes: usize) -> Self {
        let partitioner = Murmur3Partitioner;
        let tokens: Vec<_> = (0..vnodes)
            .map(|i| partitioner.partition(format!("{}:{}", node.id, i).as_bytes()))
            .collect();
        self.add_tokens(node, tokens)
    }
}
