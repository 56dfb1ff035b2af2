use {
    anyhow::{Context, Result},
    argh::FromArgs,
    god::{
        git, output,
        version::{self, Version},
    },
    std::{fs, path::PathBuf, process},
};

/// Compute, create, and optionally push the next release tag.
///
/// Scans commit subjects since the highest semantic-version tag for
/// `#major` / `#minor` / `#patch` markers (patch when none are present),
/// renders a changelog, and prints the new tag name alone on stdout. Run it
/// from a checkout with full history; it is wired into CI and never
/// reachable from the `god` dispatcher.
#[derive(FromArgs)]
struct ReleaseCmd {
    #[argh(option, default = "String::from(\"origin\")")]
    /// remote to push the created tag to (default: origin)
    remote: String,

    #[argh(option)]
    /// write the generated changelog to this file
    changelog: Option<PathBuf>,

    #[argh(switch)]
    /// compute and print the tag and changelog without creating anything
    dry_run: bool,

    #[argh(switch)]
    /// push the created tag to the remote
    push: bool,
}

fn main() {
    let cmd: ReleaseCmd = argh::from_env();
    if let Err(err) = cmd.run() {
        output::error(&format!("{err:#}"));
        process::exit(1);
    }
}

impl ReleaseCmd {
    fn run(&self) -> Result<()> {
        let repo = PathBuf::from(".");

        let tags = git::tags(&repo).context("failed to list tags")?;
        let latest = version::highest(&tags);
        let (base, since) = match &latest {
            Some((tag, version)) => (*version, Some(tag.as_str())),
            None => (Version::ZERO, None),
        };

        let subjects =
            git::subjects_since(&repo, since).context("failed to read commit history")?;
        if subjects.is_empty() {
            match since {
                Some(tag) => output::warn(&format!("no commits since {tag}; nothing to release")),
                None => output::warn("no commits; nothing to release"),
            }
            return Ok(());
        }

        let bump = version::bump_for(&subjects);
        let tag = base.bumped(bump).tag();
        let notes = version::changelog(&tag, &subjects);

        if let Some(path) = &self.changelog {
            fs::write(path, &notes)
                .with_context(|| format!("failed to write changelog to {}", path.display()))?;
        }

        if self.dry_run {
            output::info(&format!(
                "dry run: {} commits since {} ask for a {bump} bump to {tag}",
                subjects.len(),
                since.unwrap_or("the beginning"),
            ));
            eprint!("{notes}");
        } else {
            git::create_tag(&repo, &tag, &notes)
                .with_context(|| format!("failed to create tag {tag}"))?;
            if self.push {
                git::push_tag(&repo, &self.remote, &tag)
                    .with_context(|| format!("failed to push tag {tag} to {}", self.remote))?;
            }
            output::success(&format!("created {tag}"));
        }

        // Stdout carries the tag name only, for CI to capture.
        println!("{tag}");
        Ok(())
    }
}
