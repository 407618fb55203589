//! Relation tree builder: breadth-first expansion of the friendship graph.

use std::collections::VecDeque;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::RelationTree;
use crate::domain::directory::UserDirectory;
use crate::domain::entities::UserId;
use crate::domain::error::DomainResult;
use crate::domain::graph::FriendshipGraph;

/// Constructs depth-bounded spanning trees rooted at a chosen user.
pub struct RelationTreeBuilder<'a> {
    directory: &'a UserDirectory,
    graph: &'a FriendshipGraph,
}

impl<'a> RelationTreeBuilder<'a> {
    pub fn new(directory: &'a UserDirectory, graph: &'a FriendshipGraph) -> Self {
        Self { directory, graph }
    }

    /// Build the relation tree of `root_id` down to `max_depth`.
    ///
    /// A user is marked visited when first discovered, so each user appears
    /// once and keeps the first parent that reached it. Nodes at `max_depth`
    /// are leaves. Children follow the graph's neighbor order.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, root_id: UserId, max_depth: usize) -> DomainResult<RelationTree> {
        let root_index = self.directory.find_index(root_id)?;

        let user_count = self.directory.len();
        let mut visited = vec![false; user_count];
        let mut tree = RelationTree::with_capacity(user_count);
        let mut queue: VecDeque<(Index, usize, usize)> = VecDeque::new();

        let root = tree.insert_node(root_index, None);
        visited[root_index] = true;
        queue.push_back((root, root_index, 0));

        while let Some((node_idx, user, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for &friend in self.graph.neighbors_of(user) {
                if friend >= user_count || visited[friend] {
                    continue;
                }
                visited[friend] = true;
                let child = tree.insert_node(friend, Some(node_idx));
                queue.push_back((child, friend, depth + 1));
            }
        }

        debug!(root_id, max_depth, nodes = tree.len(), "relation tree built");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    fn fixture(users: &[UserId], edges: &[(usize, usize)]) -> (UserDirectory, FriendshipGraph) {
        let mut dir = UserDirectory::new();
        let mut graph = FriendshipGraph::new();
        for &id in users {
            dir.add_user(id, &format!("u{id}")).unwrap();
            graph.add_vertex();
        }
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        (dir, graph)
    }

    #[test]
    fn given_unknown_root_when_building_then_not_found() {
        let (dir, graph) = fixture(&[1], &[]);
        let result = RelationTreeBuilder::new(&dir, &graph).build(99, 3);
        assert_eq!(result.unwrap_err(), DomainError::NotFound(99));
    }

    #[test]
    fn given_zero_depth_when_building_then_root_only() {
        let (dir, graph) = fixture(&[1, 2], &[(0, 1)]);
        let tree = RelationTreeBuilder::new(&dir, &graph).build(1, 0).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_user(), Some(0));
    }

    #[test]
    fn given_cycle_when_building_then_first_parent_wins() {
        // triangle 0-1-2 plus 2-3
        let (dir, graph) = fixture(&[1, 2, 3, 4], &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let tree = RelationTreeBuilder::new(&dir, &graph).build(1, 5).unwrap();

        let nodes: Vec<_> = tree.iter().map(|(_, n)| (n.user, n.depth)).collect();
        // neighbors of 0 newest first: [2, 1]
        assert_eq!(nodes, vec![(0, 0), (2, 1), (3, 2), (1, 1)]);
    }
}
