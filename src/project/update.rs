//! Merging repository metadata into a project file.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::document::{DocumentError, ProjectDocument};
use super::DEFAULT_SECTION;
use crate::metadata::RepositoryMetadata;
use crate::ports::filesystem::FileSystem;

/// Per-file update failure. Never fatal to the run.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The file could not be read.
    #[error("cannot read file: {0}")]
    Read(String),

    /// The file is not a usable project document.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The updated document could not be written back.
    #[error("cannot write file: {0}")]
    Write(String),
}

/// How to apply an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Top-level object receiving the variables.
    pub section: String,
    /// Compute the result without writing the file.
    pub dry_run: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            dry_run: false,
        }
    }
}

/// Outcome of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// File that was updated.
    pub path: PathBuf,
    /// Every variable and the value written, in metadata order.
    pub written: Vec<(&'static str, String)>,
    /// Variables whose stored value differed before the update.
    pub changed: Vec<&'static str>,
    /// `true` if the file was left untouched on disk.
    pub dry_run: bool,
}

impl UpdateReport {
    /// Returns `true` if the update left every variable as it was.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Writes every metadata field into `options.section` of the project at
/// `path`, leaving the rest of the document as it was.
///
/// # Errors
///
/// Returns an [`UpdateError`] if the file cannot be read, parsed or written.
/// The file is only written once the whole document has been updated in
/// memory.
pub fn update_project(
    fs: &dyn FileSystem,
    path: &Path,
    metadata: &RepositoryMetadata,
    options: &UpdateOptions,
) -> Result<UpdateReport, UpdateError> {
    let text = fs.read_to_string(path).map_err(|e| UpdateError::Read(e.to_string()))?;
    let mut document = ProjectDocument::parse(&text)?;

    // Create the section even when metadata is unchanged.
    document.section_mut_or_insert(&options.section)?;

    let mut written = Vec::with_capacity(RepositoryMetadata::KEYS.len());
    let mut changed = Vec::new();
    for (key, value) in metadata.fields() {
        if document.set_variable(&options.section, key, value)? {
            changed.push(key);
        }
        written.push((key, value.to_string()));
    }

    if options.dry_run {
        tracing::debug!(path = %path.display(), changed = changed.len(), "dry run, not writing");
    } else {
        let output = document.to_pretty_string()?;
        fs.write(path, &output).map_err(|e| UpdateError::Write(e.to_string()))?;
        tracing::info!(path = %path.display(), changed = changed.len(), "updated project");
    }

    Ok(UpdateReport {
        path: path.to_path_buf(),
        written,
        changed,
        dry_run: options.dry_run,
    })
}
