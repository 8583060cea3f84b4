//! The update run: collect metadata once, resolve targets, update each.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::metadata::{collect, RepositoryMetadata};
use crate::project::{
    discover, update_project, TargetFileSet, UpdateError, UpdateOptions, UpdateReport,
};

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Explicit target; `None` scans for files.
    pub project_file: Option<PathBuf>,
    /// Filename pattern for scanning.
    pub pattern: Pattern,
    /// How each file is updated.
    pub update: UpdateOptions,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            project_file: cli.project_file.clone(),
            pattern: cli.pattern.clone(),
            update: UpdateOptions {
                section: cli.section.clone(),
                dry_run: cli.dry_run,
            },
        }
    }
}

/// What happened to each target of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    /// Metadata written to every target.
    pub metadata: RepositoryMetadata,
    /// Successful updates.
    pub updated: Vec<UpdateReport>,
    /// Targets that could not be updated, with the reason.
    pub failed: Vec<(PathBuf, UpdateError)>,
}

/// Execute a run against `root`.
///
/// Metadata is collected before any target is resolved; per-file failures
/// are printed and collected in the summary without failing the run.
///
/// # Errors
///
/// Returns an error string if metadata collection fails, the explicit
/// project file does not exist, or a scan finds no files.
pub fn run_with_context(
    ctx: &ServiceContext,
    options: &RunOptions,
    root: &Path,
) -> Result<RunSummary, String> {
    let metadata = collect(ctx.git.as_ref()).map_err(|e| format!("Error: {e}"))?;

    let targets = resolve_targets(ctx, options, root)?;
    if let TargetFileSet::Discovered(paths) = &targets {
        println!("Found {} KiCad project(s):", paths.len());
    }

    let mut summary = RunSummary { metadata, updated: Vec::new(), failed: Vec::new() };
    for path in targets.paths() {
        match update_project(ctx.fs.as_ref(), path, &summary.metadata, &options.update) {
            Ok(report) => {
                print_report(&report);
                summary.updated.push(report);
            }
            Err(err) => {
                eprintln!("Error updating {}: {err}", path.display());
                tracing::debug!(path = %path.display(), error = %err, "project update failed");
                summary.failed.push((path.clone(), err));
            }
        }
    }
    Ok(summary)
}

fn resolve_targets(
    ctx: &ServiceContext,
    options: &RunOptions,
    root: &Path,
) -> Result<TargetFileSet, String> {
    if let Some(path) = &options.project_file {
        if !ctx.fs.exists(path) {
            return Err(format!("Error: Project file '{}' not found", path.display()));
        }
        return Ok(TargetFileSet::Explicit(path.clone()));
    }

    let targets = discover(ctx.fs.as_ref(), root, &options.pattern)
        .map_err(|e| format!("Error: cannot scan {}: {e}", root.display()))?;
    if targets.is_empty() {
        return Err(format!(
            "No {} files found in current directory or subdirectories",
            options.pattern
        ));
    }
    Ok(targets)
}

fn print_report(report: &UpdateReport) {
    let verb = if report.dry_run { "Would update" } else { "✓ Updated" };
    println!("{verb} {} with git information:", report.path.display());
    for (key, value) in &report.written {
        println!("  {key}: {value}");
    }
}
