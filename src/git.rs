//! Thin wrappers over the `git` binary.
//!
//! Every operation is addressed at an explicit working-copy path via `-C`;
//! nothing here changes the process working directory. Whether a directory
//! actually holds a healthy clone is never verified.

use {
    crate::shell::{self, CommandError},
    std::path::Path,
};

/// Clone `url` into `dest`.
pub fn clone(url: &str, dest: &Path) -> Result<(), CommandError> {
    shell::run_live("git", &["clone", url, &dest.to_string_lossy()], None)
}

/// Fetch all remote refs.
pub fn fetch_all(root: &Path) -> Result<(), CommandError> {
    shell::run_live("git", &["-C", &root.to_string_lossy(), "fetch", "--all"], None)
}

/// Name of the currently checked-out branch.
pub fn current_branch(root: &Path) -> Result<String, CommandError> {
    shell::run_capture(
        "git",
        &["-C", &root.to_string_lossy(), "rev-parse", "--abbrev-ref", "HEAD"],
        None,
    )
}

/// Check out `branch`, creating a tracking branch from the remote if needed.
pub fn checkout(root: &Path, branch: &str) -> Result<(), CommandError> {
    shell::run_live("git", &["-C", &root.to_string_lossy(), "checkout", branch], None)
}

/// Hard-reset the working copy to `target`, discarding local changes.
pub fn reset_hard(root: &Path, target: &str) -> Result<(), CommandError> {
    shell::run_live(
        "git",
        &["-C", &root.to_string_lossy(), "reset", "--hard", target],
        None,
    )
}

/// All tag names in the repository.
pub fn tags(root: &Path) -> Result<Vec<String>, CommandError> {
    let out = shell::run_capture("git", &["-C", &root.to_string_lossy(), "tag", "--list"], None)?;
    Ok(out.lines().map(str::to_string).collect())
}

/// Commit subjects after `since` (the whole history when `None`), oldest
/// first. Blank subjects are dropped.
pub fn subjects_since(root: &Path, since: Option<&str>) -> Result<Vec<String>, CommandError> {
    let range = match since {
        Some(tag) => format!("{tag}..HEAD"),
        None => "HEAD".to_string(),
    };
    let out = shell::run_capture(
        "git",
        &[
            "-C",
            &root.to_string_lossy(),
            "log",
            "--reverse",
            "--format=%s",
            &range,
        ],
        None,
    )?;
    Ok(out
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Create an annotated tag named `name` with `message` as its annotation.
pub fn create_tag(root: &Path, name: &str, message: &str) -> Result<(), CommandError> {
    shell::run_live(
        "git",
        &["-C", &root.to_string_lossy(), "tag", "-a", name, "-m", message],
        None,
    )
}

/// Push the tag `name` to `remote`.
pub fn push_tag(root: &Path, remote: &str, name: &str) -> Result<(), CommandError> {
    shell::run_live("git", &["-C", &root.to_string_lossy(), "push", remote, name], None)
}
