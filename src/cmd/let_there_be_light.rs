use {
    crate::{cmd::SubCmd, config::Config, error::BootstrapError, git, output, shell},
    anyhow::Result,
    argh::FromArgs,
    std::fs,
};

/// Clone or update the working copy, then build it.
#[derive(FromArgs)]
#[argh(subcommand, name = "let-there-be-light")]
pub struct LetThereBeLightSubCmd {
    #[argh(option, short = 'b')]
    /// branch to check out and reset to (overrides the BRANCH variable)
    branch: Option<String>,
}

impl SubCmd for LetThereBeLightSubCmd {
    fn run(&self) -> Result<()> {
        let mut config = Config::from_env()?;
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
        shell::set_echo(config.debug);
        bootstrap(&config)?;
        Ok(())
    }
}

/// The full bootstrap sequence: sync the working copy, then build it.
///
/// Aborts on the first failing step. There is no retry, rollback, or
/// cleanup; an interrupted run leaves the working copy in whatever state
/// the failing tool left it in, and the next run's hard reset is the only
/// recovery mechanism.
pub fn bootstrap(config: &Config) -> Result<(), BootstrapError> {
    sync_working_copy(config)?;
    build(config)?;
    output::success(&format!(
        "working copy at {} is ready",
        config.workspace.display()
    ));
    Ok(())
}

/// Bring the working copy in line with `origin/<branch>`.
///
/// An existing workspace directory is taken at face value; nothing checks
/// that it actually holds a healthy clone.
pub fn sync_working_copy(config: &Config) -> Result<(), BootstrapError> {
    if config.workspace.exists() {
        output::info(&format!(
            "updating working copy at {}",
            config.workspace.display()
        ));
    } else {
        output::info(&format!(
            "cloning {} into {}",
            config.remote_url,
            config.workspace.display()
        ));
        if let Some(parent) = config.workspace.parent() {
            fs::create_dir_all(parent).map_err(|source| BootstrapError::Workspace {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        git::clone(&config.remote_url, &config.workspace)
            .map_err(|source| BootstrapError::Network {
                action: "clone",
                source,
            })?;
    }

    git::fetch_all(&config.workspace).map_err(|source| BootstrapError::Network {
        action: "fetch",
        source,
    })?;

    let current = git::current_branch(&config.workspace).map_err(|source| {
        BootstrapError::Repository {
            action: "branch lookup",
            source,
        }
    })?;
    if current != config.branch {
        output::info(&format!("switching from {current} to {}", config.branch));
        git::checkout(&config.workspace, &config.branch).map_err(|source| {
            BootstrapError::Repository {
                action: "checkout",
                source,
            }
        })?;
    }

    let target = format!("origin/{}", config.branch);
    output::info(&format!("resetting working copy to {target}"));
    git::reset_hard(&config.workspace, &target).map_err(|source| BootstrapError::Repository {
        action: "reset",
        source,
    })?;

    Ok(())
}

/// Invoke `make` in the `src` subdirectory of the working copy.
pub fn build(config: &Config) -> Result<(), BootstrapError> {
    let build_dir = config.workspace.join("src");
    if !build_dir.is_dir() {
        return Err(BootstrapError::MissingBuildDir { path: build_dir });
    }
    output::info(&format!("building in {}", build_dir.display()));
    shell::run_live("make", &[], Some(&build_dir))
        .map_err(|source| BootstrapError::Build { source })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{fs, path::Path},
        tempfile::tempdir,
    };

    fn git(dir: &Path, args: &[&str]) {
        let mut full = vec!["-C", dir.to_str().unwrap()];
        full.extend_from_slice(args);
        shell::run_capture("git", &full, None).unwrap();
    }

    /// A local "remote": one commit on `main` touching README.md, plus a
    /// `dev` branch carrying an extra file.
    fn seed_origin(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        git(dir, &["init", "--quiet"]);
        git(dir, &["checkout", "-b", "main"]);
        git(dir, &["config", "user.name", "tester"]);
        git(dir, &["config", "user.email", "tester@example.com"]);
        fs::write(dir.join("README.md"), "first\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "--quiet", "-m", "initial state"]);

        git(dir, &["checkout", "--quiet", "-b", "dev"]);
        fs::write(dir.join("dev-only.txt"), "dev\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "--quiet", "-m", "dev state"]);
        git(dir, &["checkout", "--quiet", "main"]);
    }

    fn config_for(origin: &Path, workspace: &Path) -> Config {
        Config {
            remote_url: origin.to_string_lossy().into_owned(),
            workspace: workspace.to_path_buf(),
            branch: "main".to_string(),
            debug: false,
        }
    }

    #[test]
    fn absent_workspace_is_cloned() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        seed_origin(&origin);

        // The parent directory does not exist yet either.
        let workspace = tmp.path().join("data/god");
        sync_working_copy(&config_for(&origin, &workspace)).unwrap();

        assert!(workspace.join(".git").is_dir());
        assert_eq!(fs::read_to_string(workspace.join("README.md")).unwrap(), "first\n");
    }

    #[test]
    fn existing_workspace_is_updated_in_place() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        seed_origin(&origin);
        let workspace = tmp.path().join("god");
        let config = config_for(&origin, &workspace);
        sync_working_copy(&config).unwrap();

        // Local edits and new upstream commits, plus an untracked marker
        // that a re-clone could not have survived.
        fs::write(workspace.join("README.md"), "local edit\n").unwrap();
        fs::write(workspace.join("marker.txt"), "untracked\n").unwrap();
        fs::write(origin.join("README.md"), "second\n").unwrap();
        git(&origin, &["add", "."]);
        git(&origin, &["commit", "--quiet", "-m", "upstream change"]);

        sync_working_copy(&config).unwrap();

        assert_eq!(fs::read_to_string(workspace.join("README.md")).unwrap(), "second\n");
        assert!(workspace.join("marker.txt").exists());
    }

    #[test]
    fn configured_branch_is_checked_out() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        seed_origin(&origin);
        let workspace = tmp.path().join("god");

        let mut config = config_for(&origin, &workspace);
        config.branch = "dev".to_string();
        sync_working_copy(&config).unwrap();

        assert_eq!(git::current_branch(&workspace).unwrap(), "dev");
        assert!(workspace.join("dev-only.txt").exists());
    }

    #[test]
    fn missing_build_dir_fails_before_any_build() {
        let tmp = tempdir().unwrap();
        let config = Config {
            remote_url: String::new(),
            workspace: tmp.path().to_path_buf(),
            branch: "main".to_string(),
            debug: false,
        };

        let err = build(&config).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingBuildDir { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
