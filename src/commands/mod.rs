//! Command dispatch and handlers.

pub mod update;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::context::ServiceContext;

/// Records every port interaction into cassettes in this directory.
pub const RECORD_ENV: &str = "KICAD_GITINFO_RECORD";
/// Replays a whole recorded session from this directory.
pub const REPLAY_ENV: &str = "KICAD_GITINFO_REPLAY";
/// Serves git queries from this cassette instead of running git.
pub const REPLAY_GIT_ENV: &str = "KICAD_GITINFO_REPLAY_GIT";

/// Dispatch a parsed command line.
///
/// Runs against the current directory. `KICAD_GITINFO_REPLAY` replays every
/// port from a recorded session, `KICAD_GITINFO_REPLAY_GIT` only the git
/// port; `KICAD_GITINFO_RECORD` records the session.
///
/// # Errors
///
/// Returns an error string for any fatal failure (metadata collection,
/// missing target, no targets, cassette I/O).
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let workdir = Path::new(".");
    let mut ctx = ServiceContext::replaying_from(&cassette_config(), workdir)?;

    let session = match env::var(RECORD_ENV) {
        Ok(dir) => Some(RecordingSession::at(PathBuf::from(dir), workdir)?),
        Err(_) => None,
    };
    if let Some(session) = &session {
        ctx = ctx.recording(session);
    }

    let options = update::RunOptions::from(cli);
    let result = update::run_with_context(&ctx, &options, workdir).map(|_| ());

    // Finish recording after the run completes (even on error)
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Cassettes selected by the environment. Empty when nothing is replayed.
fn cassette_config() -> CassetteConfig {
    let mut config = match env::var_os(REPLAY_ENV) {
        Some(dir) => CassetteConfig::from_session_dir(Path::new(&dir)),
        None => CassetteConfig::default(),
    };
    if let Some(cassette) = env::var_os(REPLAY_GIT_ENV) {
        config.git = Some(PathBuf::from(cassette));
    }
    config
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
