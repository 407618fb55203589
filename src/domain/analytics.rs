//! Graph analytics over the friendship graph and built relation trees.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::domain::arena::RelationTree;
use crate::domain::directory::UserDirectory;
use crate::domain::entities::{Community, UserId};
use crate::domain::error::DomainResult;
use crate::domain::graph::FriendshipGraph;

/// Read-only analytics bound to one loaded network.
pub struct GraphAnalytics<'a> {
    directory: &'a UserDirectory,
    graph: &'a FriendshipGraph,
}

impl<'a> GraphAnalytics<'a> {
    pub fn new(directory: &'a UserDirectory, graph: &'a FriendshipGraph) -> Self {
        Self { directory, graph }
    }

    /// Identifiers of every tree node at exactly `target_depth`, in
    /// depth-first left-to-right order.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn friends_at_depth(&self, tree: &RelationTree, target_depth: usize) -> Vec<UserId> {
        tree.iter()
            .filter(|(_, node)| node.depth == target_depth)
            .filter_map(|(_, node)| self.directory.get(node.user))
            .map(|user| user.id)
            .collect()
    }

    /// Friends shared by `id_a` and `id_b`, in `id_b`'s neighbor order.
    #[instrument(level = "debug", skip(self))]
    pub fn common_friends(&self, id_a: UserId, id_b: UserId) -> DomainResult<Vec<UserId>> {
        let index_a = self.directory.find_index(id_a)?;
        let index_b = self.directory.find_index(id_b)?;

        let mut friends_of_a = vec![false; self.directory.len()];
        for &friend in self.graph.neighbors_of(index_a) {
            if let Some(mark) = friends_of_a.get_mut(friend) {
                *mark = true;
            }
        }

        let common = self
            .graph
            .neighbors_of(index_b)
            .iter()
            .filter(|&&friend| friends_of_a.get(friend).copied().unwrap_or(false))
            .filter_map(|&friend| self.directory.get(friend))
            .map(|user| user.id)
            .collect();
        Ok(common)
    }

    /// Connected components in discovery order, numbered from 1.
    ///
    /// Directory indices are scanned in ascending order; each unvisited
    /// index seeds a breadth-first search that marks users on discovery.
    #[instrument(level = "debug", skip(self))]
    pub fn detect_communities(&self) -> Vec<Community> {
        let user_count = self.directory.len();
        let mut visited = vec![false; user_count];
        let mut communities = Vec::new();

        for start in 0..user_count {
            if visited[start] {
                continue;
            }
            let mut members = Vec::new();
            let mut queue = VecDeque::new();
            visited[start] = true;
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                if let Some(user) = self.directory.get(current) {
                    members.push(user.clone());
                }
                for &friend in self.graph.neighbors_of(current) {
                    if friend < user_count && !visited[friend] {
                        visited[friend] = true;
                        queue.push_back(friend);
                    }
                }
            }

            communities.push(Community {
                number: communities.len() + 1,
                members,
            });
        }

        debug!(count = communities.len(), "communities detected");
        communities
    }

    /// Local influence score in `[0, 1]`.
    ///
    /// Each direct friend `F` contributes `1 / (degree(F) + 1)`; the sum is
    /// averaged over the user's own degree. Users without friends score 0.
    #[instrument(level = "debug", skip(self))]
    pub fn influence(&self, id: UserId) -> DomainResult<f64> {
        let index = self.directory.find_index(id)?;
        let friends = self.graph.neighbors_of(index);
        if friends.is_empty() {
            return Ok(0.0);
        }

        let total: f64 = friends
            .iter()
            .map(|&friend| 1.0 / (self.graph.degree(friend) as f64 + 1.0))
            .sum();
        Ok(total / friends.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::RelationTreeBuilder;
    use crate::domain::error::DomainError;

    // 1 - 2 - 3 - 4, 5 isolated
    fn fixture() -> (UserDirectory, FriendshipGraph) {
        let mut dir = UserDirectory::new();
        let mut graph = FriendshipGraph::new();
        for (id, name) in [(1, "Ana"), (2, "Bora"), (3, "Cem"), (4, "Deniz"), (5, "Ece")] {
            dir.add_user(id, name).unwrap();
            graph.add_vertex();
        }
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        (dir, graph)
    }

    #[test]
    fn given_chain_when_collecting_depth_then_only_matching_level() {
        let (dir, graph) = fixture();
        let tree = RelationTreeBuilder::new(&dir, &graph).build(1, 3).unwrap();
        let analytics = GraphAnalytics::new(&dir, &graph);
        assert_eq!(analytics.friends_at_depth(&tree, 0), vec![1]);
        assert_eq!(analytics.friends_at_depth(&tree, 2), vec![3]);
        assert_eq!(analytics.friends_at_depth(&tree, 3), vec![4]);
        assert!(analytics.friends_at_depth(&tree, 4).is_empty());
    }

    #[test]
    fn given_unbounded_deep_chain_when_collecting_last_level_then_no_overflow() {
        let n = 200_000;
        let mut dir = UserDirectory::with_limits(None, None);
        let mut graph = FriendshipGraph::new();
        for id in 0..n {
            dir.add_user(id as UserId, "u").unwrap();
            graph.add_vertex();
        }
        for i in 1..n {
            graph.add_edge(i - 1, i);
        }

        let tree = RelationTreeBuilder::new(&dir, &graph)
            .build(0, usize::MAX)
            .unwrap();
        let analytics = GraphAnalytics::new(&dir, &graph);

        assert_eq!(tree.len(), n);
        assert_eq!(tree.height(), n);
        assert_eq!(
            analytics.friends_at_depth(&tree, n - 1),
            vec![(n - 1) as UserId]
        );
    }

    #[test]
    fn given_unknown_user_when_common_friends_then_not_found() {
        let (dir, graph) = fixture();
        let analytics = GraphAnalytics::new(&dir, &graph);
        assert_eq!(
            analytics.common_friends(1, 77),
            Err(DomainError::NotFound(77))
        );
    }

    #[test]
    fn given_isolated_user_when_influence_then_zero() {
        let (dir, graph) = fixture();
        let analytics = GraphAnalytics::new(&dir, &graph);
        assert_eq!(analytics.influence(5).unwrap(), 0.0);
    }

    #[test]
    fn given_isolated_user_when_detecting_then_own_community() {
        let (dir, graph) = fixture();
        let communities = GraphAnalytics::new(&dir, &graph).detect_communities();
        assert_eq!(communities.len(), 2);
        assert_eq!(communities[1].number, 2);
        assert_eq!(communities[1].members.len(), 1);
        assert!(communities[1].contains(5));
    }
}
