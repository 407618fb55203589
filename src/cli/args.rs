//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::UserId;

/// In-memory social network analysis: relation trees, communities, influence and user lookup
#[derive(Parser, Debug)]
#[command(name = "socgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Dataset file (default from config: veriseti.txt)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the relation tree of a user
    Tree {
        /// Root user id
        id: UserId,
        /// Maximum depth
        depth: usize,
    },

    /// List friends at exactly the given distance
    Depth {
        /// User id
        id: UserId,
        /// Distance to search
        depth: usize,
    },

    /// List friends shared by two users
    Common {
        /// First user id
        first: UserId,
        /// Second user id
        second: UserId,
    },

    /// List connected communities
    Communities,

    /// Compute the influence score of a user
    Influence {
        /// User id
        id: UserId,
    },

    /// Look a user up in the red-black index
    Search {
        /// User id
        id: UserId,
    },

    /// List all users by ascending id
    Users,

    /// Interactive numbered menu
    Menu,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
