//! Semantic-version arithmetic for release tags.
//!
//! Tags look like `v1.2.3` (the `v` prefix is optional when parsing). The
//! size of the next bump is taken from commit subjects: the strongest of the
//! `#major` / `#minor` / `#patch` markers wins, and no marker at all means a
//! patch release.

use {
    regex::Regex,
    std::{fmt, sync::OnceLock},
};

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").expect("valid tag pattern"))
}

/// A `MAJOR.MINOR.PATCH` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Base version used when the repository has no release tag yet.
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Parse a tag of the form `1.2.3` or `v1.2.3`.
    ///
    /// Anything else (partial triples, pre-release suffixes, arbitrary tag
    /// names) is `None`.
    pub fn parse(tag: &str) -> Option<Version> {
        let captures = tag_pattern().captures(tag.trim())?;
        // The pattern only matches digit runs; a triple that still fails to
        // parse must be out of range for u64.
        Some(Version {
            major: captures[1].parse().ok()?,
            minor: captures[2].parse().ok()?,
            patch: captures[3].parse().ok()?,
        })
    }

    /// The version after applying `bump`.
    pub fn bumped(self, bump: Bump) -> Version {
        match bump {
            Bump::Major => Version {
                major: self.major + 1,
                minor: 0,
                patch: 0,
            },
            Bump::Minor => Version {
                major: self.major,
                minor: self.minor + 1,
                patch: 0,
            },
            Bump::Patch => Version {
                patch: self.patch + 1,
                ..self
            },
        }
    }

    /// The tag name for this version.
    pub fn tag(&self) -> String {
        format!("v{self}")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Size of a version bump, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bump {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bump::Patch => "patch",
            Bump::Minor => "minor",
            Bump::Major => "major",
        };
        f.write_str(label)
    }
}

fn marker(subject: &str) -> Option<Bump> {
    if subject.contains("#major") {
        Some(Bump::Major)
    } else if subject.contains("#minor") {
        Some(Bump::Minor)
    } else if subject.contains("#patch") {
        Some(Bump::Patch)
    } else {
        None
    }
}

/// The bump requested by a set of commit subjects.
///
/// The strongest marker found anywhere wins; subjects without markers do not
/// weaken it. No markers at all defaults to a patch bump.
pub fn bump_for<S: AsRef<str>>(subjects: &[S]) -> Bump {
    subjects
        .iter()
        .filter_map(|subject| marker(subject.as_ref()))
        .max()
        .unwrap_or(Bump::Patch)
}

/// The highest semantic version among `tags`, with the tag it came from.
///
/// Tags that are not semantic versions are ignored, and the listing order
/// does not matter: `v0.10.0` beats `v0.9.9`.
pub fn highest(tags: &[String]) -> Option<(String, Version)> {
    tags.iter()
        .filter_map(|tag| Version::parse(tag).map(|version| (tag.clone(), version)))
        .max_by_key(|(_, version)| *version)
}

/// Render release notes: a heading for `tag` followed by one bullet per
/// commit subject, oldest first.
pub fn changelog<S: AsRef<str>>(tag: &str, subjects: &[S]) -> String {
    let mut notes = format!("## {tag}\n\n");
    for subject in subjects {
        notes.push_str("- ");
        notes.push_str(subject.as_ref());
        notes.push('\n');
    }
    notes
}
