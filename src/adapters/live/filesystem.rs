//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Directory names never descended into while scanning.
const SKIPPED_DIRS: &[&str] = &[".git"];

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError> {
        if !root.is_dir() {
            return Err(format!("{} is not a directory", root.display()).into());
        }

        let mut files = Vec::new();
        // Links are not followed into directories, but a link to a file is
        // reported like the file itself.
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        for entry in walker.filter_entry(|e| {
            e.depth() == 0 || !SKIPPED_DIRS.iter().any(|skip| e.file_name() == *skip)
        }) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(entry) if entry.path_is_symlink() && entry.path().is_file() => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("skipping unreadable entry: {err}"),
            }
        }
        Ok(files)
    }
}
