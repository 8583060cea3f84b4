//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to `<dir>/<port>.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for git interactions.
    pub git: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a recording session writing into `output_dir`.
    ///
    /// `workdir` is the repository being recorded; its HEAD is stamped into
    /// each cassette header.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn at(output_dir: impl Into<PathBuf>, workdir: &Path) -> Result<Self, String> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            format!("Failed to create cassette directory {}: {e}", output_dir.display())
        })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let commit = get_commit_hash(workdir);

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, commit.as_str())))
        };

        let git = make_recorder("git");
        let fs = make_recorder("fs");
        Ok(Self { git, fs, output_dir })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// All recording adapters holding a recorder must have been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a cassette file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.git, "git")?;
        finish_one(self.fs, "fs")?;

        Ok(self.output_dir)
    }
}

/// HEAD of the repository at `workdir`, or "unknown" with a warning.
fn get_commit_hash(workdir: &Path) -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(workdir)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        tracing::warn!("could not read HEAD for cassette header, using 'unknown'");
        "unknown".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rec");

        let session = RecordingSession::at(&out, dir.path()).unwrap();
        assert!(session.output_dir().exists());
        session.git.lock().unwrap().record("git", "head_hash", json!(null), json!({"ok": "a"}));

        let written = session.finish().unwrap();
        assert_eq!(written, out);
        assert!(out.join("git.cassette.yaml").exists());
        assert!(out.join("fs.cassette.yaml").exists());
    }

    #[test]
    fn finish_fails_while_recorder_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::at(dir.path(), dir.path()).unwrap();
        let _held = Arc::clone(&session.git);
        let err = session.finish().err().unwrap();
        assert!(err.contains("still has references"));
    }

    #[test]
    fn commit_hash_outside_repository_is_unknown_or_hash() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!get_commit_hash(dir.path()).is_empty());
    }
}
