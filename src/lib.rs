//! socgraph: in-memory social network analysis.
//!
//! Users and undirected friendships are loaded once into a
//! [`domain::SocialNetwork`]. Queries build breadth-first relation trees,
//! find friends at a given distance, intersect friend lists, detect
//! communities, score influence, and look users up through a red-black
//! tree keyed by id.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
