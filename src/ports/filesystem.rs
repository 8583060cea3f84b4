//! Filesystem port for file I/O operations.

use std::path::{Path, PathBuf};

use super::PortError;

/// Provides filesystem access for reading, writing and scanning files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to an existing file, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively lists every regular file below `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` or one of its subdirectories cannot be read.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError>;
}
