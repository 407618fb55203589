//! Domain entities: core data structures

use std::fmt;

/// Externally assigned user identifier.
pub type UserId = i64;

/// A member of the social network.
///
/// Immutable once created. Owned by the directory; everything else refers to
/// a user through its directory index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)
    }
}

/// A maximal connected component of the friendship graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    /// 1-based number in discovery order
    pub number: usize,
    /// Members in breadth-first discovery order
    pub members: Vec<User>,
}

impl Community {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.members.iter().any(|u| u.id == id)
    }
}
