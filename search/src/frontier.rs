//! Best-first frontier with a visited set.
//!
//! States are marked visited when popped, not when pushed: the same state
//! may sit in the heap several times and only its first pop counts.
//!
//! Uses a `BTreeSet`-based visited set (not `HashSet`) for deterministic
//! iteration order at serialization boundaries.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::node::{FrontierKey, SearchNode};

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest priority first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best node
/// - A `BTreeSet<String>` of popped state fingerprint hex digests
#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    visited: BTreeSet<String>,
    high_water: u64,
}

impl BestFirstFrontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node onto the frontier.
    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best (lowest priority, then oldest) node.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|e| e.node)
    }

    /// Record a popped fingerprint.
    ///
    /// Returns `false` if it was already visited.
    pub fn mark_visited(&mut self, fingerprint_hex: &str) -> bool {
        if self.visited.contains(fingerprint_hex) {
            return false;
        }
        self.visited.insert(fingerprint_hex.to_string())
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
