//! Core library entry for the `kicad-gitinfo` CLI.
//!
//! Collects git provenance for the current repository and writes it into
//! the `text_variables` of KiCad project files, where schematics and boards
//! can reference it as `${GIT_HASH}`, `${GIT_TAG}` and so on.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod metadata;
pub mod ports;
pub mod project;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the run hits a
/// fatal error.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string().trim_end().to_string()),
    };
    commands::dispatch(&cli)
}
