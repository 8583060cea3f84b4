//! Git repository port for version-control queries.

use super::PortError;

/// Read-only access to the state of a git working tree.
///
/// Every method maps to one git invocation. Abstracting git access allows
/// deterministic replay and testing without requiring a real repository.
pub trait GitRepo: Send + Sync {
    /// Checks that the working directory is inside a git work tree.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or the directory is not a
    /// repository.
    fn verify_repository(&self) -> Result<(), PortError>;

    /// Returns the full hash of the HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no commits or is invalid.
    fn head_hash(&self) -> Result<String, PortError>;

    /// Returns the abbreviated hash of the HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no commits or is invalid.
    fn head_short_hash(&self) -> Result<String, PortError>;

    /// Returns the checked-out branch name, or an empty string on a
    /// detached HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the query itself fails.
    fn current_branch(&self) -> Result<String, PortError>;

    /// Returns the tag naming HEAD exactly, or `None` if there is none.
    ///
    /// A missing tag is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if git cannot be invoked at all.
    fn exact_tag(&self) -> Result<Option<String>, PortError>;

    /// Returns the commit date of HEAD as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    fn head_date(&self) -> Result<String, PortError>;

    /// Returns the author display name of HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    fn head_author(&self) -> Result<String, PortError>;

    /// Returns the porcelain status lines of the working tree. An empty list
    /// means the tree is clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    fn working_tree_status(&self) -> Result<Vec<String>, PortError>;
}
