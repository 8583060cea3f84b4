//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::git::LiveGitRepo;
use crate::adapters::recording::{RecordingFileSystem, RecordingGitRepo};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingGitRepo};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up the adapter implementations (live or replaying,
/// optionally wrapped for recording). The context is passed explicitly to every
/// operation that touches git or the filesystem.
pub struct ServiceContext {
    /// Filesystem for reading, writing and scanning project files.
    pub fs: Box<dyn FileSystem>,
    /// Git repository for version-control queries.
    pub git: Box<dyn GitRepo>,
}

impl ServiceContext {
    /// Creates a context that replays the ports configured in `config`.
    ///
    /// Ports without a cassette use the live adapter, with git running
    /// inside `workdir`.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig, workdir: &Path) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(LiveFileSystem),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(LiveGitRepo::new(workdir)),
            },
        })
    }

    /// Wraps every port in a recording adapter feeding `session`.
    #[must_use]
    pub fn recording(self, session: &RecordingSession) -> Self {
        Self {
            fs: Box::new(RecordingFileSystem::new(self.fs, Arc::clone(&session.fs))),
            git: Box::new(RecordingGitRepo::new(self.git, Arc::clone(&session.git))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::metadata::{collect, tests::FakeGitRepo};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn replaying_from_per_port_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        let fs_path = dir.path().join("fs.cassette.yaml");
        write_cassette(
            &fs_path,
            vec![Interaction {
                seq: 0,
                port: "fs".into(),
                method: "exists".into(),
                input: json!({"path": "amp.kicad_pro"}),
                output: json!(true),
            }],
        );

        let config = CassetteConfig {
            fs: Some(fs_path),
            ..CassetteConfig::default()
        };
        let ctx = ServiceContext::replaying_from(&config, dir.path()).unwrap();
        assert!(ctx.fs.exists(Path::new("amp.kicad_pro")));
    }

    #[test]
    fn unconfigured_ports_stay_live() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("amp.kicad_pro"), "{}").unwrap();

        let ctx = ServiceContext::replaying_from(&CassetteConfig::default(), dir.path()).unwrap();
        assert!(ctx.fs.exists(&dir.path().join("amp.kicad_pro")));
        assert!(!ctx.fs.exists(&dir.path().join("other.kicad_pro")));
    }

    #[test]
    fn recorded_session_replays_to_the_same_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::at(dir.path().join("rec"), dir.path()).unwrap();
        let fake = FakeGitRepo {
            tag: Some("v2.0".into()),
            ..FakeGitRepo::default()
        };

        let recorded = {
            let ctx = ServiceContext {
                fs: Box::new(LiveFileSystem),
                git: Box::new(fake),
            }
            .recording(&session);
            collect(ctx.git.as_ref()).unwrap()
        };
        let out = session.finish().unwrap();

        let ctx =
            ServiceContext::replaying_from(&CassetteConfig::from_session_dir(&out), dir.path())
                .unwrap();
        assert_eq!(collect(ctx.git.as_ref()).unwrap(), recorded);
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = CassetteConfig {
            git: Some(dir.path().join("nope.yaml")),
            ..CassetteConfig::default()
        };
        let err = ServiceContext::replaying_from(&config, dir.path()).err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
