//! Interactive numbered menu over a loaded network.

use std::io::BufRead;

use tracing::debug;

use crate::cli::commands::{
    show_common, show_communities, show_depth, show_influence, show_search, show_tree,
};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::domain::{SocialNetwork, UserId};

/// Menu entries in display order; the number is the position plus one.
const ENTRIES: [&str; 7] = [
    "Build relation tree",
    "Find friends at depth",
    "Common friend analysis",
    "Detect communities",
    "Compute user influence",
    "Search user in red-black index",
    "Exit",
];

/// Reads choices from `input` until `7` or end of input.
pub struct Menu<'a, R> {
    network: &'a SocialNetwork,
    input: R,
}

impl<'a, R: BufRead> Menu<'a, R> {
    pub fn new(network: &'a SocialNetwork, input: R) -> Self {
        Self { network, input }
    }

    /// Run the loop. Returns the number of choices handled, exit excluded.
    pub fn run(&mut self) -> usize {
        let mut handled = 0;
        loop {
            output::header("\nSocial Network Analysis");
            for (i, entry) in ENTRIES.iter().enumerate() {
                output::info(&format!("{}. {}", i + 1, entry));
            }
            output::prompt("Choice:");

            let Some(line) = self.read_line() else {
                break;
            };
            let choice = line.trim().parse::<u32>().ok();
            debug!(?choice, "menu choice");
            if choice == Some(7) {
                output::info("Exiting...");
                break;
            }

            let result = match choice {
                Some(1) => self.ask_id_and_depth().map(|(id, d)| show_tree(self.network, id, d)),
                Some(2) => self.ask_id_and_depth().map(|(id, d)| show_depth(self.network, id, d)),
                Some(3) => self.ask_two_ids().map(|(a, b)| show_common(self.network, a, b)),
                Some(4) => {
                    show_communities(self.network);
                    Some(Ok(()))
                }
                Some(5) => self
                    .ask::<UserId>("User id:")
                    .map(|id| show_influence(self.network, id)),
                Some(6) => self
                    .ask::<UserId>("User id:")
                    .map(|id| show_search(self.network, id)),
                _ => {
                    output::warning("Invalid choice!");
                    None
                }
            };
            report(result);
            handled += 1;
        }
        handled
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }

    fn ask<T: std::str::FromStr>(&mut self, question: &str) -> Option<T> {
        output::prompt(question);
        let value = self.read_line()?.trim().parse().ok();
        if value.is_none() {
            output::warning("Invalid number!");
        }
        value
    }

    fn ask_id_and_depth(&mut self) -> Option<(UserId, usize)> {
        let id = self.ask("User id:")?;
        let depth = self.ask("Depth:")?;
        Some((id, depth))
    }

    fn ask_two_ids(&mut self) -> Option<(UserId, UserId)> {
        let first = self.ask("First user id:")?;
        let second = self.ask("Second user id:")?;
        Some((first, second))
    }
}

fn report(result: Option<CliResult<()>>) {
    if let Some(Err(e)) = result {
        output::error(&e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn network() -> SocialNetwork {
        let mut network = SocialNetwork::new();
        network.add_user(1, "Ana").unwrap();
        network.add_user(2, "Bora").unwrap();
        network.add_friendship(1, 2);
        network.build_index();
        network
    }

    #[test]
    fn given_choices_then_exit_when_running_then_stops_at_exit() {
        let network = network();
        let input = Cursor::new("1\n1\n2\n4\n6\n42\n7\n5\n1\n");
        assert_eq!(Menu::new(&network, input).run(), 3);
    }

    #[test]
    fn given_end_of_input_when_running_then_returns() {
        let network = network();
        let input = Cursor::new("9\nabc\n3\n1\n");
        // invalid choice, invalid choice, then common-friends prompt hits EOF
        assert_eq!(Menu::new(&network, input).run(), 3);
    }
}
