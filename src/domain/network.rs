//! The loaded social network: directory, graph and ordered index together.

use tracing::{debug, instrument};

use crate::domain::analytics::GraphAnalytics;
use crate::domain::builder::RelationTreeBuilder;
use crate::domain::directory::UserDirectory;
use crate::domain::entities::{User, UserId};
use crate::domain::error::DomainResult;
use crate::domain::graph::FriendshipGraph;
use crate::domain::rbtree::OrderedUserIndex;

/// Session object created at load time and passed to every query.
#[derive(Debug, Default)]
pub struct SocialNetwork {
    directory: UserDirectory,
    graph: FriendshipGraph,
    index: OrderedUserIndex,
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(capacity: Option<usize>, max_name_len: Option<usize>) -> Self {
        Self {
            directory: UserDirectory::with_limits(capacity, max_name_len),
            ..Self::default()
        }
    }

    /// Register a user and its graph vertex. Returns the directory index.
    pub fn add_user(&mut self, id: UserId, name: &str) -> DomainResult<usize> {
        let index = self.directory.add_user(id, name)?;
        let vertex = self.graph.add_vertex();
        debug_assert_eq!(index, vertex);
        Ok(index)
    }

    /// Befriend two users by identifier.
    ///
    /// Unknown identifiers, self-friendship and repeated pairs are ignored
    /// and reported as `false`.
    pub fn add_friendship(&mut self, id_a: UserId, id_b: UserId) -> bool {
        match (self.directory.find_index(id_a), self.directory.find_index(id_b)) {
            (Ok(a), Ok(b)) => self.graph.add_edge(a, b),
            _ => false,
        }
    }

    /// Rebuild the red-black index from the directory in load order.
    #[instrument(level = "debug", skip(self))]
    pub fn build_index(&mut self) {
        self.index = OrderedUserIndex::from_directory(&self.directory);
        debug!(
            users = self.index.len(),
            height = self.index.height(),
            "ordered index built"
        );
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn graph(&self) -> &FriendshipGraph {
        &self.graph
    }

    pub fn index(&self) -> &OrderedUserIndex {
        &self.index
    }

    pub fn user(&self, id: UserId) -> DomainResult<&User> {
        self.directory.find(id)
    }

    pub fn analytics(&self) -> GraphAnalytics<'_> {
        GraphAnalytics::new(&self.directory, &self.graph)
    }

    pub fn tree_builder(&self) -> RelationTreeBuilder<'_> {
        RelationTreeBuilder::new(&self.directory, &self.graph)
    }
}
