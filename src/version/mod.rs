//! Version parsing and comparison.
//!
//! Versions follow the scheme most tool version strings in the wild
//! conform to: optional epoch (`1!2.0`), dotted numeric release
//! segments, pre-release qualifiers (`a`/`b`/`rc` and their long
//! spellings), post-releases, and dev releases. Local build suffixes
//! (`+sha.abc123`) are accepted and ignored for ordering.
//!
//! Ordering notes:
//! - trailing zero segments are insignificant (`1.0 == 1.0.0`)
//! - pre-releases sort below their release (`1.0a1 < 1.0`)
//! - dev releases sort below pre-releases (`1.0.dev1 < 1.0a1`)
//! - post-releases sort above their release (`1.0.post1 > 1.0`)

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
          v?
          (?:(?P<epoch>\d+)!)?
          (?P<release>\d+(?:\.\d+)*)
          (?:[._-]?(?P<pre_tag>alpha|beta|preview|pre|rc|a|b|c)[._-]?(?P<pre_n>\d*))?
          (?:[._-]?(?:post|rev|r)[._-]?(?P<post_n>\d*)|-(?P<post_implicit>\d+))?
          (?:[._-]?dev[._-]?(?P<dev_n>\d*))?
          (?:\+[a-z0-9]+(?:[._-][a-z0-9]+)*)?
        $",
    )
    .expect("version regex must compile")
});

/// A version string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version: {0}")]
pub struct InvalidVersion(pub String);

/// Pre-release stage, ordered alpha < beta < release candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreRelease::Alpha => write!(f, "a"),
            PreRelease::Beta => write!(f, "b"),
            PreRelease::Rc => write!(f, "rc"),
        }
    }
}

/// A parsed version.
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<(PreRelease, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = VERSION_RE
            .captures(trimmed)
            .ok_or_else(|| InvalidVersion(trimmed.to_string()))?;

        let epoch = caps
            .name("epoch")
            .map(|m| m.as_str().parse())
            .transpose()
            .map_err(|_| InvalidVersion(trimmed.to_string()))?
            .unwrap_or(0);

        let release = caps["release"]
            .split('.')
            .map(|seg| seg.parse())
            .collect::<Result<Vec<u64>, _>>()
            .map_err(|_| InvalidVersion(trimmed.to_string()))?;

        let pre = match caps.name("pre_tag") {
            Some(tag) => {
                let stage = match tag.as_str().to_lowercase().as_str() {
                    "a" | "alpha" => PreRelease::Alpha,
                    "b" | "beta" => PreRelease::Beta,
                    _ => PreRelease::Rc,
                };
                Some((stage, parse_qualifier(caps.name("pre_n"))))
            }
            None => None,
        };

        // A group participates in the match iff its qualifier was present,
        // even when the trailing number is empty ("1.0.post" == "1.0.post0").
        let post = caps
            .name("post_n")
            .or_else(|| caps.name("post_implicit"))
            .map(|m| m.as_str().parse().unwrap_or(0));

        let dev = caps.name("dev_n").map(|m| m.as_str().parse().unwrap_or(0));

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
        })
    }
}

/// A missing qualifier number means zero (`1.0a` == `1.0a0`).
fn parse_qualifier(m: Option<regex::Match<'_>>) -> u64 {
    m.and_then(|m| m.as_str().parse().ok()).unwrap_or(0)
}

/// Pre-release position of a version within its release.
///
/// Variant order is the sort order: a bare dev release precedes any
/// pre-release, and a final release follows all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    ImplicitDev,
    Pre(PreRelease, u64),
    Final,
}

impl Version {
    fn pre_key(&self) -> PreKey {
        match self.pre {
            Some((stage, n)) => PreKey::Pre(stage, n),
            None if self.post.is_none() && self.dev.is_some() => PreKey::ImplicitDev,
            None => PreKey::Final,
        }
    }

    /// Dev releases sort before the version they lead up to.
    fn dev_key(&self) -> (bool, u64) {
        match self.dev {
            Some(n) => (false, n),
            None => (true, 0),
        }
    }
}

fn cmp_release(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| cmp_release(&self.release, &other.release))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((stage, n)) = self.pre {
            write!(f, "{}{}", stage, n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        Ok(())
    }
}

/// Outcome of comparing an extracted version against a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// Extracted version meets or exceeds the requirement.
    Satisfied,
    /// Extracted version is below the requirement, or nothing was
    /// extracted at all (tool missing).
    Unsatisfied,
    /// Extraction produced a non-empty string that is not a version.
    /// Deliberately distinct from [`Unsatisfied`](VersionCheck::Unsatisfied):
    /// remediation is pointless when the extraction command itself is
    /// broken, and skipping it keeps reruns idempotent.
    Invalid {
        /// The literal failing string, for operator diagnosis.
        found: String,
    },
}

/// Compare an extracted version string against a requirement.
///
/// `extracted` must already be stripped of trailing whitespace
/// (see [`CommandResult::trimmed_stdout`](crate::shell::CommandResult::trimmed_stdout)).
/// An empty string means the tool printed nothing (typically not
/// installed) and is `Unsatisfied`, not `Invalid`.
pub fn check(extracted: &str, required: &Version) -> VersionCheck {
    if extracted.is_empty() {
        return VersionCheck::Unsatisfied;
    }
    match extracted.parse::<Version>() {
        Ok(found) if found >= *required => VersionCheck::Satisfied,
        Ok(_) => VersionCheck::Unsatisfied,
        Err(_) => VersionCheck::Invalid {
            found: extracted.to_string(),
        },
    }
}
