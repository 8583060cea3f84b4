//! Repository metadata collected from git.
//!
//! [`collect`] runs the fixed sequence of read-only queries against a
//! [`GitRepo`] and returns a fully populated [`RepositoryMetadata`], or a
//! single [`CollectError`] if any mandatory query fails.

use std::fmt;

use thiserror::Error;

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Text variable holding the full HEAD hash.
pub const GIT_HASH: &str = "GIT_HASH";
/// Text variable holding the abbreviated HEAD hash.
pub const GIT_SHORT_HASH: &str = "GIT_SHORT_HASH";
/// Text variable holding the current branch (empty when detached).
pub const GIT_BRANCH: &str = "GIT_BRANCH";
/// Text variable holding the exact tag at HEAD (empty when untagged).
pub const GIT_TAG: &str = "GIT_TAG";
/// Text variable holding the HEAD commit date.
pub const GIT_DATE: &str = "GIT_DATE";
/// Text variable holding the HEAD author name.
pub const GIT_AUTHOR: &str = "GIT_AUTHOR";
/// Text variable holding `clean` or `dirty`.
pub const GIT_DIRTY: &str = "GIT_DIRTY";

/// Whether the working tree matches HEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyState {
    /// No modified, staged or untracked paths.
    Clean,
    /// At least one path differs from HEAD.
    Dirty,
}

impl DirtyState {
    /// Derives the state from `git status --porcelain` lines.
    #[must_use]
    pub fn from_status<S: AsRef<str>>(lines: &[S]) -> Self {
        if lines.iter().any(|l| !l.as_ref().trim().is_empty()) {
            Self::Dirty
        } else {
            Self::Clean
        }
    }

    /// The value written into project files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
        }
    }
}

impl fmt::Display for DirtyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the repository state at HEAD.
///
/// Built once per run by [`collect`] and passed by reference to every
/// project update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// Full commit hash.
    pub hash: String,
    /// Abbreviated commit hash.
    pub short_hash: String,
    /// Branch name, empty on a detached HEAD.
    pub branch: String,
    /// Tag naming HEAD exactly, empty if none.
    pub tag: String,
    /// Commit date, `YYYY-MM-DD`.
    pub date: String,
    /// Commit author display name.
    pub author: String,
    /// Working tree cleanliness.
    pub dirty: DirtyState,
}

impl RepositoryMetadata {
    /// Variable names in the order they are written and reported.
    pub const KEYS: [&'static str; 7] =
        [GIT_HASH, GIT_SHORT_HASH, GIT_BRANCH, GIT_TAG, GIT_DATE, GIT_AUTHOR, GIT_DIRTY];

    /// Every `(variable, value)` pair, in [`Self::KEYS`] order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            (GIT_HASH, self.hash.as_str()),
            (GIT_SHORT_HASH, self.short_hash.as_str()),
            (GIT_BRANCH, self.branch.as_str()),
            (GIT_TAG, self.tag.as_str()),
            (GIT_DATE, self.date.as_str()),
            (GIT_AUTHOR, self.author.as_str()),
            (GIT_DIRTY, self.dirty.as_str()),
        ]
    }

    /// Looks up a value by variable name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields().into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Failure to collect metadata. Collection is all-or-nothing.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The working directory is not inside a usable git repository.
    #[error("Not in a git repository or git command failed: {0}")]
    NotARepository(String),

    /// A mandatory query failed after the repository check passed.
    #[error("Not in a git repository or git command failed: {query}: {message}")]
    QueryFailed {
        /// The query that failed.
        query: &'static str,
        /// The underlying error.
        message: String,
    },
}

/// Collects repository metadata through the git port.
///
/// The tag query is the only one whose "empty" outcome is expected; every
/// other query failing aborts the whole collection.
///
/// # Errors
///
/// Returns [`CollectError::NotARepository`] if the repository check fails and
/// [`CollectError::QueryFailed`] if any mandatory query fails.
pub fn collect(git: &dyn GitRepo) -> Result<RepositoryMetadata, CollectError> {
    git.verify_repository().map_err(|e| CollectError::NotARepository(e.to_string()))?;

    let hash = git.head_hash().map_err(mandatory("head_hash"))?;
    let short_hash = git.head_short_hash().map_err(mandatory("head_short_hash"))?;
    let branch = git.current_branch().map_err(mandatory("current_branch"))?;
    let tag = git.exact_tag().map_err(mandatory("exact_tag"))?.unwrap_or_default();
    let date = git.head_date().map_err(mandatory("head_date"))?;
    let author = git.head_author().map_err(mandatory("head_author"))?;
    let status = git.working_tree_status().map_err(mandatory("working_tree_status"))?;

    let metadata = RepositoryMetadata {
        hash,
        short_hash,
        branch,
        tag,
        date,
        author,
        dirty: DirtyState::from_status(status.as_slice()),
    };
    tracing::debug!(?metadata, "collected repository metadata");
    Ok(metadata)
}

fn mandatory(query: &'static str) -> impl FnOnce(PortError) -> CollectError {
    move |e| CollectError::QueryFailed { query, message: e.to_string() }
}
