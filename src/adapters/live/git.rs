//! Live git adapter using `git` CLI commands.

use std::path::PathBuf;
use std::process::{Command, Output};

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Live git adapter that shells out to the `git` CLI.
///
/// Every command runs in `workdir` and is read-only.
#[derive(Debug, Clone)]
pub struct LiveGitRepo {
    workdir: PathBuf,
}

impl LiveGitRepo {
    /// Creates an adapter that runs git inside `workdir`.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self { workdir: workdir.into() }
    }

    fn git(&self, args: &[&str]) -> Result<Output, PortError> {
        tracing::debug!(workdir = %self.workdir.display(), "git {}", args.join(" "));
        Ok(Command::new("git").args(args).current_dir(&self.workdir).output()?)
    }

    /// Runs a query that must succeed and returns its trimmed stdout.
    fn query(&self, args: &[&str]) -> Result<String, PortError> {
        let output = self.git(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {} failed: {}", args.join(" "), stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitRepo for LiveGitRepo {
    fn verify_repository(&self) -> Result<(), PortError> {
        let inside = self.query(&["rev-parse", "--is-inside-work-tree"])?;
        if inside != "true" {
            return Err(format!("{} is not inside a work tree", self.workdir.display()).into());
        }
        Ok(())
    }

    fn head_hash(&self) -> Result<String, PortError> {
        self.query(&["rev-parse", "HEAD"])
    }

    fn head_short_hash(&self) -> Result<String, PortError> {
        self.query(&["rev-parse", "--short", "HEAD"])
    }

    fn current_branch(&self) -> Result<String, PortError> {
        self.query(&["branch", "--show-current"])
    }

    fn exact_tag(&self) -> Result<Option<String>, PortError> {
        // A non-zero exit just means HEAD carries no tag.
        let output = self.git(&["describe", "--tags", "--exact-match"])?;
        if !output.status.success() {
            return Ok(None);
        }
        let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(tag).filter(|t| !t.is_empty()))
    }

    fn head_date(&self) -> Result<String, PortError> {
        self.query(&["log", "-1", "--format=%cd", "--date=short"])
    }

    fn head_author(&self) -> Result<String, PortError> {
        self.query(&["log", "-1", "--format=%an"])
    }

    fn working_tree_status(&self) -> Result<Vec<String>, PortError> {
        let status = self.query(&["status", "--porcelain"])?;
        Ok(status.lines().filter(|l| !l.trim().is_empty()).map(String::from).collect())
    }
}
