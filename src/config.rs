//! Runtime configuration, populated once at startup.

use {
    crate::error::BootstrapError,
    std::{
        env,
        path::{Path, PathBuf},
    },
};

/// Owner of the repository the bootstrap targets.
pub const REPO_OWNER: &str = "godsh";

/// Name of the repository the bootstrap targets.
pub const REPO_NAME: &str = "god";

/// Branch used when the `BRANCH` variable is unset.
pub const DEFAULT_BRANCH: &str = "main";

/// Overrides the branch to check out and reset to.
pub const BRANCH_VAR: &str = "BRANCH";

/// Enables echoing of external command lines.
pub const DEBUG_VAR: &str = "DEBUG";

/// Everything the bootstrap sequence needs, resolved up front.
///
/// The workspace path is computed exactly once here; every step receives it
/// from this structure rather than recomputing it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote repository the working copy tracks.
    pub remote_url: String,

    /// Local working copy, rooted under the user-local data directory.
    pub workspace: PathBuf,

    /// Branch to check out and reset to.
    pub branch: String,

    /// Echo external command lines before running them.
    pub debug: bool,
}

impl Config {
    /// Resolve the configuration from the environment.
    ///
    /// `BRANCH` and `DEBUG` fall back to their documented defaults when
    /// unset; no other environment state is consulted.
    pub fn from_env() -> Result<Self, BootstrapError> {
        let data_dir = dirs::data_local_dir().ok_or(BootstrapError::DataDir)?;
        let branch = env::var(BRANCH_VAR).ok();
        let debug = env::var(DEBUG_VAR).ok();
        Ok(Self::resolve(&data_dir, branch.as_deref(), debug.as_deref()))
    }

    fn resolve(data_dir: &Path, branch: Option<&str>, debug: Option<&str>) -> Self {
        Self {
            remote_url: format!("https://github.com/{REPO_OWNER}/{REPO_NAME}.git"),
            workspace: data_dir.join(REPO_NAME),
            branch: branch.unwrap_or(DEFAULT_BRANCH).to_string(),
            debug: debug.is_some_and(truthy),
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use {super::*, std::path::Path};

    #[test]
    fn defaults_apply_when_variables_are_unset() {
        let config = Config::resolve(Path::new("/data"), None, None);
        assert_eq!(config.branch, DEFAULT_BRANCH);
        assert!(!config.debug);
        assert_eq!(config.workspace, Path::new("/data").join(REPO_NAME));
        assert_eq!(
            config.remote_url,
            format!("https://github.com/{REPO_OWNER}/{REPO_NAME}.git")
        );
    }

    #[test]
    fn branch_variable_overrides_the_default() {
        let config = Config::resolve(Path::new("/data"), Some("release"), None);
        assert_eq!(config.branch, "release");
    }

    #[test]
    fn debug_accepts_common_truthy_spellings() {
        for value in ["1", "true", "TRUE", "yes", "on", " True "] {
            let config = Config::resolve(Path::new("/data"), None, Some(value));
            assert!(config.debug, "{value:?} should enable debug");
        }
        for value in ["", "0", "false", "off", "nope"] {
            let config = Config::resolve(Path::new("/data"), None, Some(value));
            assert!(!config.debug, "{value:?} should not enable debug");
        }
    }
}
