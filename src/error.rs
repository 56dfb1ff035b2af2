//! Typed failures for the bootstrap sequence.

use {
    crate::shell::CommandError,
    std::{io, path::PathBuf},
    thiserror::Error,
};

/// Failure of one step of the bootstrap sequence.
///
/// Each variant names the step that failed; the sequence short-circuits on
/// the first one. The process exit code is the failing child's own code
/// where it has one.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("no user-local data directory is available on this platform")]
    DataDir,

    #[error("cannot prepare workspace at {}: {source}", .path.display())]
    Workspace { path: PathBuf, source: io::Error },

    #[error("build directory {} does not exist", .path.display())]
    MissingBuildDir { path: PathBuf },

    /// A git operation that talks to the remote failed.
    #[error("network operation failed during {action}: {source}")]
    Network {
        action: &'static str,
        source: CommandError,
    },

    /// A git operation on the local working copy failed.
    #[error("git {action} failed: {source}")]
    Repository {
        action: &'static str,
        source: CommandError,
    },

    #[error("build failed: {source}")]
    Build { source: CommandError },
}

impl BootstrapError {
    /// Exit code for the whole process when this error aborts the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::DataDir
            | BootstrapError::Workspace { .. }
            | BootstrapError::MissingBuildDir { .. } => 1,
            BootstrapError::Network { source, .. }
            | BootstrapError::Repository { source, .. }
            | BootstrapError::Build { source } => source.exit_code(),
        }
    }
}
