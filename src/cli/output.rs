//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{Community, RelationTree, UserDirectory, UserId};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented list item
pub fn item(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "-".green(), msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl std::fmt::Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Label of one tree node: `Name (ID: 7, Depth: 1)`.
fn node_label(directory: &UserDirectory, user: usize, depth: usize) -> String {
    match directory.get(user) {
        Some(u) => format!("{} (ID: {}, Depth: {})", u.name, u.id, depth),
        None => format!("#{} (Depth: {})", user, depth),
    }
}

/// Convert a relation tree into a printable `termtree`.
pub fn relation_tree(directory: &UserDirectory, tree: &RelationTree) -> Tree<String> {
    fn build(directory: &UserDirectory, tree: &RelationTree, idx: Index) -> Option<Tree<String>> {
        let node = tree.get_node(idx)?;
        let leaves: Vec<_> = node
            .children
            .iter()
            .filter_map(|&child| build(directory, tree, child))
            .collect();
        Some(Tree::new(node_label(directory, node.user, node.depth)).with_leaves(leaves))
    }

    tree.root()
        .and_then(|root| build(directory, tree, root))
        .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
}

/// Print users by id as `- Name (ID: n)` lines.
pub fn user_list(directory: &UserDirectory, ids: &[UserId]) {
    for &id in ids {
        match directory.find(id) {
            Ok(user) => item(user),
            Err(_) => item(&format!("ID: {}", id)),
        }
    }
}

/// One-line community summary: `Community 1: Ana Bora`.
pub fn community_line(community: &Community) -> String {
    format!(
        "{} {}: {}",
        "Community".bold(),
        community.number,
        community.members.iter().map(|u| u.name.as_str()).join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SocialNetwork;

    #[test]
    fn given_chain_when_rendered_then_nested_labels() {
        let mut network = SocialNetwork::new();
        network.add_user(1, "Ana").unwrap();
        network.add_user(2, "Bora").unwrap();
        network.add_friendship(1, 2);
        let tree = network.tree_builder().build(1, 1).unwrap();

        let rendered = relation_tree(network.directory(), &tree).to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Ana (ID: 1, Depth: 0)");
        assert!(lines[1].ends_with("Bora (ID: 2, Depth: 1)"));
    }

    #[test]
    fn given_empty_tree_when_rendered_then_placeholder() {
        let directory = UserDirectory::new();
        let rendered = relation_tree(&directory, &RelationTree::new()).to_string();
        assert_eq!(rendered.trim_end(), "Empty tree");
    }
}
