//! Recording adapter for the `GitRepo` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{GitRepo, PortError};

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn record<T: serde::Serialize>(
        &self,
        method: &str,
        result: Result<T, PortError>,
    ) -> Result<T, PortError> {
        record_result(&self.recorder, "git", method, &(), &result);
        result
    }
}

impl GitRepo for RecordingGitRepo {
    fn verify_repository(&self) -> Result<(), PortError> {
        self.record("verify_repository", self.inner.verify_repository())
    }

    fn head_hash(&self) -> Result<String, PortError> {
        self.record("head_hash", self.inner.head_hash())
    }

    fn head_short_hash(&self) -> Result<String, PortError> {
        self.record("head_short_hash", self.inner.head_short_hash())
    }

    fn current_branch(&self) -> Result<String, PortError> {
        self.record("current_branch", self.inner.current_branch())
    }

    fn exact_tag(&self) -> Result<Option<String>, PortError> {
        self.record("exact_tag", self.inner.exact_tag())
    }

    fn head_date(&self) -> Result<String, PortError> {
        self.record("head_date", self.inner.head_date())
    }

    fn head_author(&self) -> Result<String, PortError> {
        self.record("head_author", self.inner.head_author())
    }

    fn working_tree_status(&self) -> Result<Vec<String>, PortError> {
        self.record("working_tree_status", self.inner.working_tree_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::metadata::tests::FakeGitRepo;

    #[test]
    fn records_every_query_with_ok_and_err_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("git.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let fake = FakeGitRepo {
                tag: None,
                author: None,
                ..FakeGitRepo::default()
            };
            let git = RecordingGitRepo::new(Box::new(fake), Arc::clone(&recorder));
            assert_eq!(git.head_hash().unwrap(), FakeGitRepo::default().hash);
            assert_eq!(git.exact_tag().unwrap(), None);
            assert!(git.head_author().is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        let methods: Vec<&str> = cassette.interactions.iter().map(|i| i.method.as_str()).collect();
        assert_eq!(methods, vec!["head_hash", "exact_tag", "head_author"]);
        assert_eq!(cassette.interactions[1].output, serde_json::json!({"ok": null}));
        assert!(cassette.interactions[2].output.get("err").is_some());
    }
}
