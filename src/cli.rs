//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use glob::Pattern;

use crate::project::{DEFAULT_PATTERN, DEFAULT_SECTION};

/// Top-level CLI parser for `kicad-gitinfo`.
#[derive(Debug, Parser)]
#[command(
    name = "kicad-gitinfo",
    version,
    about = "Write git provenance into KiCad project text variables"
)]
pub struct Cli {
    /// Project file to update. Without it, every matching file below the
    /// current directory is updated.
    pub project_file: Option<PathBuf>,

    /// Filename pattern used when scanning for project files.
    #[arg(long, default_value = DEFAULT_PATTERN, value_parser = parse_pattern)]
    pub pattern: Pattern,

    /// Top-level object that receives the git variables.
    #[arg(long, default_value = DEFAULT_SECTION, value_parser = NonEmptyStringValueParser::new())]
    pub section: String,

    /// Show what would be written without modifying any file.
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_pattern(raw: &str) -> Result<Pattern, String> {
    Pattern::new(raw).map_err(|e| format!("invalid glob pattern: {e}"))
}
