//! Command dispatch: each query loads the network, then runs against it.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{load_file, ApplicationError};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{SocialNetwork, UserId};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config) => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        Some(Commands::Tree { id, depth }) => show_tree(&load_network(cli)?, *id, *depth),
        Some(Commands::Depth { id, depth }) => show_depth(&load_network(cli)?, *id, *depth),
        Some(Commands::Common { first, second }) => {
            show_common(&load_network(cli)?, *first, *second)
        }
        Some(Commands::Communities) => {
            show_communities(&load_network(cli)?);
            Ok(())
        }
        Some(Commands::Influence { id }) => show_influence(&load_network(cli)?, *id),
        Some(Commands::Search { id }) => show_search(&load_network(cli)?, *id),
        Some(Commands::Users) => {
            show_users(&load_network(cli)?);
            Ok(())
        }
        Some(Commands::Menu) | None => {
            let network = load_network(cli)?;
            let stdin = io::stdin();
            Menu::new(&network, stdin.lock()).run();
            Ok(())
        }
    }
}

/// Settings from config files and environment, with `--file` on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|source| ApplicationError::Io {
        context: "current directory".to_string(),
        source,
    })?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(file) = &cli.file {
        settings.dataset = file.clone();
    }
    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn load_network(cli: &Cli) -> CliResult<SocialNetwork> {
    let settings = load_settings(cli)?;
    let (network, report) = load_file(&settings.dataset, &settings)?;
    if report.rejected_users > 0 {
        output::warning(&format!(
            "{} user record(s) rejected while loading {}",
            report.rejected_users,
            settings.dataset.display()
        ));
    }
    Ok(network)
}

#[instrument(level = "debug", skip(network))]
pub(crate) fn show_tree(network: &SocialNetwork, id: UserId, depth: usize) -> CliResult<()> {
    let tree = network.tree_builder().build(id, depth)?;
    output::header("Relation tree:");
    output::info(&output::relation_tree(network.directory(), &tree));
    Ok(())
}

#[instrument(level = "debug", skip(network))]
pub(crate) fn show_depth(network: &SocialNetwork, id: UserId, depth: usize) -> CliResult<()> {
    let tree = network.tree_builder().build(id, depth)?;
    let friends = network.analytics().friends_at_depth(&tree, depth);
    if friends.is_empty() {
        output::info("No friends found at that depth.");
    } else {
        output::header(&format!("Friends at depth {}:", depth));
        output::user_list(network.directory(), &friends);
    }
    Ok(())
}

#[instrument(level = "debug", skip(network))]
pub(crate) fn show_common(network: &SocialNetwork, first: UserId, second: UserId) -> CliResult<()> {
    let common = network.analytics().common_friends(first, second)?;
    if common.is_empty() {
        output::info("No common friends.");
    } else {
        output::header("Common friends:");
        output::user_list(network.directory(), &common);
    }
    Ok(())
}

pub(crate) fn show_communities(network: &SocialNetwork) {
    output::header("Communities:");
    for community in network.analytics().detect_communities() {
        output::info(&output::community_line(&community));
    }
}

#[instrument(level = "debug", skip(network))]
pub(crate) fn show_influence(network: &SocialNetwork, id: UserId) -> CliResult<()> {
    let score = network.analytics().influence(id)?;
    let user = network.user(id)?;
    output::info(&format!("Influence of {}: {:.2}", user, score));
    Ok(())
}

#[instrument(level = "debug", skip(network))]
pub(crate) fn show_search(network: &SocialNetwork, id: UserId) -> CliResult<()> {
    let user = network.index().search(id)?;
    output::info(&format!("User found: {}", user));
    Ok(())
}

pub(crate) fn show_users(network: &SocialNetwork) {
    output::header(&format!("Users ({}):", network.index().len()));
    for user in network.index().iter() {
        output::item(user);
    }
}
