//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path are not
/// replayed.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the git port cassette file.
    pub git: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the git port.
    pub git: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Config for a directory written by a recording session
    /// (`<dir>/git.cassette.yaml`, `<dir>/fs.cassette.yaml`).
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        Self {
            git: Some(dir.join("git.cassette.yaml")),
            fs: Some(dir.join("fs.cassette.yaml")),
        }
    }

    /// Load a single cassette file and create a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            git: self.git.as_deref().map(Self::load_cassette).transpose()?,
            fs: self.fs.as_deref().map(Self::load_cassette).transpose()?,
        })
    }
}
