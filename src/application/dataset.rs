//! Dataset ingestion for the line-oriented network format.
//!
//! ```text
//! USER <id> <name>
//! FRIEND <id1> <id2>
//! ```
//!
//! Blank and malformed lines are skipped. Records apply in file order, so a
//! friendship naming a user that appears later in the file is ignored.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{SocialNetwork, UserId};

/// One parsed dataset line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    User { id: UserId, name: String },
    Friend { id_a: UserId, id_b: UserId },
}

/// Outcome counters of a dataset load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub users: usize,
    pub friendships: usize,
    /// USER records refused as duplicate or over capacity
    pub rejected_users: usize,
    /// FRIEND records naming unknown users, self-links or repeats
    pub ignored_friendships: usize,
    pub malformed_lines: usize,
}

fn user_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^USER\s+([+-]?\d+)\s+(\S.*)$").expect("static USER pattern"))
}

// Two leading integers; whatever follows the second one is ignored.
fn friend_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^FRIEND\s+([+-]?\d+)\s+([+-]?\d+)").expect("static FRIEND pattern"))
}

/// Parse a single line. Returns None for blank or malformed lines.
pub fn parse_line(line: &str) -> Option<Record> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = user_regex().captures(line) {
        let id = caps[1].parse().ok()?;
        return Some(Record::User {
            id,
            name: caps[2].to_string(),
        });
    }
    if let Some(caps) = friend_regex().captures(line) {
        let id_a = caps[1].parse().ok()?;
        let id_b = caps[2].parse().ok()?;
        return Some(Record::Friend { id_a, id_b });
    }
    None
}

/// Build a network from dataset text and index it.
#[instrument(level = "debug", skip(text, settings))]
pub fn load_str(text: &str, settings: &Settings) -> (SocialNetwork, LoadReport) {
    let mut network = SocialNetwork::with_limits(settings.capacity(), settings.name_limit());
    let mut report = LoadReport::default();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(Record::User { id, name }) => match network.add_user(id, &name) {
                Ok(_) => report.users += 1,
                Err(e) => {
                    warn!(line = line_no + 1, "skipping user record: {}", e);
                    report.rejected_users += 1;
                }
            },
            Some(Record::Friend { id_a, id_b }) => {
                if network.add_friendship(id_a, id_b) {
                    report.friendships += 1;
                } else {
                    debug!(line = line_no + 1, id_a, id_b, "friendship ignored");
                    report.ignored_friendships += 1;
                }
            }
            None => {
                debug!(line = line_no + 1, "malformed line skipped");
                report.malformed_lines += 1;
            }
        }
    }

    network.build_index();
    info!(
        users = report.users,
        friendships = report.friendships,
        rejected = report.rejected_users,
        malformed = report.malformed_lines,
        "dataset loaded"
    );
    (network, report)
}

/// Read and load a dataset file.
#[instrument(level = "debug", skip(settings))]
pub fn load_file(path: &Path, settings: &Settings) -> ApplicationResult<(SocialNetwork, LoadReport)> {
    let text = std::fs::read_to_string(path).with_path_context("read dataset", path)?;
    Ok(load_str(&text, settings))
}
