//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (git, filesystem). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod git;

pub use filesystem::FileSystem;
pub use git::GitRepo;

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
