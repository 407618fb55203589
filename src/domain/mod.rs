//! Domain layer: entities and graph algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod analytics;
pub mod arena;
pub mod builder;
pub mod directory;
pub mod entities;
pub mod error;
pub mod graph;
pub mod network;
pub mod rbtree;

pub use analytics::GraphAnalytics;
pub use arena::{RelationNode, RelationTree};
pub use builder::RelationTreeBuilder;
pub use directory::UserDirectory;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use graph::FriendshipGraph;
pub use network::SocialNetwork;
pub use rbtree::{Color, OrderedUserIndex};
