//! KiCad project files: parsing, discovery and the text-variable update.

pub mod discover;
pub mod document;
pub mod update;

pub use discover::{discover, TargetFileSet};
pub use document::{DocumentError, ProjectDocument};
pub use update::{update_project, UpdateError, UpdateOptions, UpdateReport};

/// Section of a `.kicad_pro` file that holds project text variables.
pub const DEFAULT_SECTION: &str = "text_variables";

/// Filename glob matching KiCad project files.
pub const DEFAULT_PATTERN: &str = "*.kicad_pro";
