//! Append-only user directory with identifier to index resolution.

use std::collections::HashMap;

use tracing::{instrument, trace};

use crate::domain::entities::{User, UserId};
use crate::domain::error::{DomainError, DomainResult};

/// Ordered list of users in load order.
///
/// The index of a user never changes once assigned, so graph and tree code
/// can refer to users by index alone.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    by_id: HashMap<UserId, usize>,
    /// Maximum number of users, None for unbounded
    capacity: Option<usize>,
    /// Maximum display name length in characters, None for unbounded
    max_name_len: Option<usize>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(capacity: Option<usize>, max_name_len: Option<usize>) -> Self {
        Self {
            capacity,
            max_name_len,
            ..Self::default()
        }
    }

    /// Appends a user and returns its directory index.
    ///
    /// Names longer than the configured bound are truncated on a character
    /// boundary.
    #[instrument(level = "trace", skip(self, name))]
    pub fn add_user(&mut self, id: UserId, name: &str) -> DomainResult<usize> {
        if self.by_id.contains_key(&id) {
            return Err(DomainError::Duplicate(id));
        }
        if let Some(cap) = self.capacity {
            if self.users.len() >= cap {
                return Err(DomainError::CapacityExceeded(cap));
            }
        }

        let name = match self.max_name_len {
            Some(max) => name.chars().take(max).collect(),
            None => name.to_string(),
        };
        let index = self.users.len();
        self.users.push(User::new(id, name));
        self.by_id.insert(id, index);
        trace!(id, index, "user added");
        Ok(index)
    }

    pub fn find_index(&self, id: UserId) -> DomainResult<usize> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or(DomainError::NotFound(id))
    }

    pub fn get(&self, index: usize) -> Option<&User> {
        self.users.get(index)
    }

    pub fn find(&self, id: UserId) -> DomainResult<&User> {
        let index = self.find_index(id)?;
        Ok(&self.users[index])
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Users in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_users_when_added_then_indices_follow_load_order() {
        let mut dir = UserDirectory::new();
        assert_eq!(dir.add_user(10, "Ana").unwrap(), 0);
        assert_eq!(dir.add_user(5, "Bora").unwrap(), 1);
        assert_eq!(dir.find_index(5).unwrap(), 1);
        assert_eq!(
            dir.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![10, 5]
        );
    }

    #[test]
    fn given_existing_id_when_added_then_duplicate() {
        let mut dir = UserDirectory::new();
        dir.add_user(1, "Ana").unwrap();
        assert_eq!(dir.add_user(1, "Other"), Err(DomainError::Duplicate(1)));
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get(0).unwrap().name, "Ana");
    }

    #[test]
    fn given_full_directory_when_added_then_capacity_exceeded() {
        let mut dir = UserDirectory::with_limits(Some(2), None);
        dir.add_user(1, "Ana").unwrap();
        dir.add_user(2, "Bora").unwrap();
        assert_eq!(
            dir.add_user(3, "Cem"),
            Err(DomainError::CapacityExceeded(2))
        );
    }

    #[test]
    fn given_long_name_when_added_then_truncated_on_char_boundary() {
        let mut dir = UserDirectory::with_limits(None, Some(3));
        let idx = dir.add_user(1, "Çağrı").unwrap();
        assert_eq!(dir.get(idx).unwrap().name, "Çağ");
    }

    #[test]
    fn given_unknown_id_when_resolved_then_not_found() {
        let dir = UserDirectory::new();
        assert_eq!(dir.find_index(42), Err(DomainError::NotFound(42)));
        assert!(dir.find(42).is_err());
    }
}
