//! Undirected friendship graph over directory indices.
//!
//! Adjacency lists keep the most recently added friend first, so traversal
//! output lists newer friendships before older ones.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

static NO_NEIGHBORS: VecDeque<usize> = VecDeque::new();

/// Adjacency-list graph. Vertex `i` is the user at directory index `i`.
#[derive(Debug, Default)]
pub struct FriendshipGraph {
    adjacency: Vec<VecDeque<usize>>,
    /// Each undirected edge once, as `(min, max)`
    edges: HashSet<(usize, usize)>,
}

impl FriendshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(VecDeque::new());
        self.adjacency.len() - 1
    }

    /// Inserts the undirected edge `a - b`.
    ///
    /// Returns false and leaves the graph untouched when either index is out
    /// of range, when `a == b`, or when the edge already exists.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a >= self.adjacency.len() || b >= self.adjacency.len() || a == b {
            return false;
        }
        if !self.edges.insert(edge_key(a, b)) {
            return false;
        }
        self.adjacency[a].push_front(b);
        self.adjacency[b].push_front(a);
        trace!(a, b, "edge added");
        true
    }

    /// Neighbors of `index`, most recently added first. Empty for an unknown
    /// index.
    pub fn neighbors_of(&self, index: usize) -> &VecDeque<usize> {
        self.adjacency.get(index).unwrap_or(&NO_NEIGHBORS)
    }

    pub fn degree(&self, index: usize) -> usize {
        self.neighbors_of(index).len()
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.contains(&edge_key(a, b))
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}
