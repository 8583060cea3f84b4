//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Replays recorded filesystem operations from a cassette.
///
/// Writes are not performed; only the recorded outcome is returned.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        extract_result(&output, "fs::read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        let output = next_output(&self.replayer, "fs", "write");
        extract_result(&output, "fs::write")
    }

    fn exists(&self, _path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", "exists");
        extract_result(&output, "fs::exists").unwrap_or_else(|err| {
            tracing::warn!("{err}");
            false
        })
    }

    fn walk_files(&self, _root: &Path) -> Result<Vec<PathBuf>, PortError> {
        let output = next_output(&self.replayer, "fs", "walk_files");
        extract_result(&output, "fs::walk_files")
    }
}
