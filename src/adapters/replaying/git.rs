//! Replaying adapter for the `GitRepo` port.

use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Replays recorded git queries from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, PortError> {
        let output = next_output(&self.replayer, "git", method);
        extract_result(&output, &format!("git::{method}"))
    }
}

impl GitRepo for ReplayingGitRepo {
    fn verify_repository(&self) -> Result<(), PortError> {
        self.replay("verify_repository")
    }

    fn head_hash(&self) -> Result<String, PortError> {
        self.replay("head_hash")
    }

    fn head_short_hash(&self) -> Result<String, PortError> {
        self.replay("head_short_hash")
    }

    fn current_branch(&self) -> Result<String, PortError> {
        self.replay("current_branch")
    }

    fn exact_tag(&self) -> Result<Option<String>, PortError> {
        self.replay("exact_tag")
    }

    fn head_date(&self) -> Result<String, PortError> {
        self.replay("head_date")
    }

    fn head_author(&self) -> Result<String, PortError> {
        self.replay("head_author")
    }

    fn working_tree_status(&self) -> Result<Vec<String>, PortError> {
        self.replay("working_tree_status")
    }
}
