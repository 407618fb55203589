//! Red-black tree keyed by user identifier.
//!
//! Nodes live in a generational arena; child and parent links are arena
//! handles. The tree is built once by insertion and only searched afterwards.

use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::directory::UserDirectory;
use crate::domain::entities::{User, UserId};
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct RbNode {
    user: User,
    color: Color,
    left: Option<Index>,
    right: Option<Index>,
    /// Back-reference used by rotations, None for the root
    parent: Option<Index>,
}

/// Ordered user index with O(log n) search.
#[derive(Debug, Default)]
pub struct OrderedUserIndex {
    arena: Arena<RbNode>,
    root: Option<Index>,
}

impl OrderedUserIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every directory user in load order.
    #[instrument(level = "debug", skip(directory), fields(users = directory.len()))]
    pub fn from_directory(directory: &UserDirectory) -> Self {
        let mut index = Self {
            arena: Arena::with_capacity(directory.len()),
            root: None,
        };
        for user in directory.iter() {
            index.insert(user.clone());
        }
        index
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Color of the root node, None for an empty tree.
    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|r| self.arena[r].color)
    }

    /// Binary-search insert followed by red-black fixup.
    ///
    /// Equal identifiers descend to the right.
    pub fn insert(&mut self, user: User) {
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(current) = cursor {
            parent = Some(current);
            cursor = if user.id < self.arena[current].user.id {
                self.arena[current].left
            } else {
                self.arena[current].right
            };
        }

        let goes_left = parent.map(|p| user.id < self.arena[p].user.id);
        trace!(id = user.id, "rb insert");
        let z = self.arena.insert(RbNode {
            user,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        });

        match (parent, goes_left) {
            (Some(p), Some(true)) => self.arena[p].left = Some(z),
            (Some(p), _) => self.arena[p].right = Some(z),
            (None, _) => self.root = Some(z),
        }

        self.insert_fixup(z);
    }

    fn is_red(&self, idx: Option<Index>) -> bool {
        idx.map_or(false, |i| self.arena[i].color == Color::Red)
    }

    fn insert_fixup(&mut self, mut z: Index) {
        while let Some(p) = self.arena[z].parent {
            if self.arena[p].color != Color::Red {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.arena[p].parent else {
                break;
            };

            if self.arena[g].left == Some(p) {
                let uncle = self.arena[g].right;
                if self.is_red(uncle) {
                    self.recolor_around(p, uncle, g);
                    z = g;
                    continue;
                }
                if self.arena[p].right == Some(z) {
                    z = p;
                    self.rotate_left(z);
                }
                if let Some(p) = self.arena[z].parent {
                    self.arena[p].color = Color::Black;
                    if let Some(g) = self.arena[p].parent {
                        self.arena[g].color = Color::Red;
                        self.rotate_right(g);
                    }
                }
            } else {
                let uncle = self.arena[g].left;
                if self.is_red(uncle) {
                    self.recolor_around(p, uncle, g);
                    z = g;
                    continue;
                }
                if self.arena[p].left == Some(z) {
                    z = p;
                    self.rotate_right(z);
                }
                if let Some(p) = self.arena[z].parent {
                    self.arena[p].color = Color::Black;
                    if let Some(g) = self.arena[p].parent {
                        self.arena[g].color = Color::Red;
                        self.rotate_left(g);
                    }
                }
            }
        }

        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }

    fn recolor_around(&mut self, parent: Index, uncle: Option<Index>, grandparent: Index) {
        self.arena[parent].color = Color::Black;
        if let Some(u) = uncle {
            self.arena[u].color = Color::Black;
        }
        self.arena[grandparent].color = Color::Red;
    }

    /// Replace `old` with `new` in the link held by `old`'s parent, or in
    /// the root handle.
    fn replace_child(&mut self, parent: Option<Index>, old: Index, new: Index) {
        match parent {
            None => self.root = Some(new),
            Some(p) if self.arena[p].left == Some(old) => self.arena[p].left = Some(new),
            Some(p) => self.arena[p].right = Some(new),
        }
    }

    fn rotate_left(&mut self, x: Index) {
        let Some(y) = self.arena[x].right else {
            return;
        };
        let inner = self.arena[y].left;
        self.arena[x].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }

        let x_parent = self.arena[x].parent;
        self.arena[y].parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.arena[y].left = Some(x);
        self.arena[x].parent = Some(y);
    }

    fn rotate_right(&mut self, y: Index) {
        let Some(x) = self.arena[y].left else {
            return;
        };
        let inner = self.arena[x].right;
        self.arena[y].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(y);
        }

        let y_parent = self.arena[y].parent;
        self.arena[x].parent = y_parent;
        self.replace_child(y_parent, y, x);

        self.arena[x].right = Some(y);
        self.arena[y].parent = Some(x);
    }

    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, id: UserId) -> DomainResult<&User> {
        let mut cursor = self.root;
        while let Some(current) = cursor {
            let node = &self.arena[current];
            cursor = match id.cmp(&node.user.id) {
                Ordering::Equal => return Ok(&node.user),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        Err(DomainError::NotFound(id))
    }

    /// Longest root-to-leaf path in nodes.
    pub fn height(&self) -> usize {
        fn walk(arena: &Arena<RbNode>, idx: Option<Index>) -> usize {
            match idx {
                None => 0,
                Some(i) => 1 + walk(arena, arena[i].left).max(walk(arena, arena[i].right)),
            }
        }
        walk(&self.arena, self.root)
    }

    /// Users in ascending identifier order.
    pub fn iter(&self) -> InOrderIter<'_> {
        let mut iter = InOrderIter {
            arena: &self.arena,
            stack: Vec::new(),
        };
        iter.push_left(self.root);
        iter
    }

    /// Check every red-black and ordering invariant.
    ///
    /// Returns the black height (nil leaves excluded) or a description of
    /// the first violation found.
    pub fn validate(&self) -> Result<usize, String> {
        if self.is_red(self.root) {
            return Err("root is red".to_string());
        }
        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err("root has a parent".to_string());
            }
        }
        let black_height = self.validate_node(self.root, None, None)?;

        let ids: Vec<_> = self.iter().map(|u| u.id).collect();
        if ids.len() != self.len() {
            return Err(format!("reached {} of {} nodes", ids.len(), self.len()));
        }
        Ok(black_height)
    }

    fn validate_node(
        &self,
        idx: Option<Index>,
        low: Option<UserId>,
        high: Option<UserId>,
    ) -> Result<usize, String> {
        let Some(i) = idx else {
            return Ok(0);
        };
        let node = &self.arena[i];
        let id = node.user.id;
        if low.is_some_and(|l| id < l) || high.is_some_and(|h| id >= h) {
            return Err(format!("node {id} out of order"));
        }
        for child in [node.left, node.right].into_iter().flatten() {
            if self.arena[child].parent != Some(i) {
                return Err(format!("broken parent link below {id}"));
            }
            if node.color == Color::Red && self.arena[child].color == Color::Red {
                return Err(format!("red node {id} has a red child"));
            }
        }
        let left = self.validate_node(node.left, low, Some(id))?;
        let right = self.validate_node(node.right, Some(id), high)?;
        if left != right {
            return Err(format!("black height differs below {id}: {left} vs {right}"));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

pub struct InOrderIter<'a> {
    arena: &'a Arena<RbNode>,
    stack: Vec<Index>,
}

impl<'a> InOrderIter<'a> {
    fn push_left(&mut self, mut cursor: Option<Index>) {
        while let Some(i) = cursor {
            self.stack.push(i);
            cursor = self.arena[i].left;
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a User;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.arena[idx];
        self.push_left(node.right);
        Some(&node.user)
    }
}
