use generational_arena::{Arena, Index};
use tracing::instrument;

/// One user's position in a relation tree.
#[derive(Debug)]
pub struct RelationNode {
    /// Directory index of the user
    pub user: usize,
    /// Distance from the root, root is 0
    pub depth: usize,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in discovery order
    pub children: Vec<Index>,
}

/// Arena-based relation tree produced by breadth-first expansion.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// The tree owns every node; dropping it releases the whole expansion.
#[derive(Debug)]
pub struct RelationTree {
    arena: Arena<RelationNode>,
    root: Option<Index>,
}

impl Default for RelationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            root: None,
        }
    }

    /// Inserts a node under `parent`, or as the root when `parent` is None.
    ///
    /// The child's depth is derived from the parent so depths always grow by
    /// exactly one along an edge.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, user: usize, parent: Option<Index>) -> Index {
        let depth = parent
            .and_then(|p| self.arena.get(p))
            .map_or(0, |p| p.depth + 1);
        let node = RelationNode {
            user,
            depth,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&RelationNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Directory index of the root user.
    pub fn root_user(&self) -> Option<usize> {
        self.root.and_then(|r| self.get_node(r)).map(|n| n.user)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels; a lone root has height 1, an empty tree 0.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter().map(|(_, n)| n.depth + 1).max().unwrap_or(0)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a RelationTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a RelationTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a RelationNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}
