//! Resolving which project files a run updates.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// The files one invocation updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFileSet {
    /// A single path named on the command line.
    Explicit(PathBuf),
    /// Every file found by a recursive scan, sorted by path.
    Discovered(Vec<PathBuf>),
}

impl TargetFileSet {
    /// The target paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Explicit(path) => std::slice::from_ref(path),
            Self::Discovered(paths) => paths,
        }
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths().len()
    }

    /// Returns `true` if there is nothing to update.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }
}

/// Recursively finds files below `root` whose name matches `pattern`.
///
/// Paths below `.` are returned relative to it (`hw/amp.kicad_pro` rather
/// than `./hw/amp.kicad_pro`).
///
/// # Errors
///
/// Returns an error if `root` cannot be scanned.
pub fn discover(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: &Pattern,
) -> Result<TargetFileSet, PortError> {
    let mut matches: Vec<PathBuf> = fs
        .walk_files(root)?
        .into_iter()
        .filter(|path| {
            path.file_name().and_then(|n| n.to_str()).is_some_and(|name| pattern.matches(name))
        })
        .map(|path| {
            if root == Path::new(".") {
                path.strip_prefix(root).map(Path::to_path_buf).unwrap_or(path)
            } else {
                path
            }
        })
        .collect();
    matches.sort();

    for path in &matches {
        tracing::debug!(path = %path.display(), "discovered project file");
    }
    Ok(TargetFileSet::Discovered(matches))
}
