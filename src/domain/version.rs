//! Structured version identifier with pre/dev/post release qualifiers
//!
//! A version is a release tuple (conventionally major.minor.patch) plus
//! optional qualifiers: a pre-release pair like `rc2`, a `.devN` development
//! snapshot, and a `.postN` post-release correction. Values are immutable;
//! every transformation constructs a new `Version`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{ReleasyError, Result};

/// Pre-release label, normalized to its short spelling.
///
/// Input aliases: "alpha"/"a", "beta"/"b", and "rc"/"c"/"pre"/"preview".
/// Labels order as alpha < beta < rc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreLabel {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl FromStr for PreLabel {
    type Err = ReleasyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Ok(PreLabel::Alpha),
            "b" | "beta" => Ok(PreLabel::Beta),
            "c" | "rc" | "pre" | "preview" => Ok(PreLabel::ReleaseCandidate),
            other => Err(ReleasyError::version(format!(
                "Unknown pre-release label: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreLabel::Alpha => write!(f, "a"),
            PreLabel::Beta => write!(f, "b"),
            PreLabel::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

/// Immutable structured version: release tuple plus optional qualifiers.
///
/// Fields are private; values are built through [Version::new],
/// [Version::from_parts] or [Version::parse] and read through accessors.
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    pre: Option<(PreLabel, u64)>,
    dev: Option<u64>,
    post: Option<u64>,
}

impl Version {
    /// Create a plain final release version (no qualifiers).
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            release: vec![major, minor, patch],
            pre: None,
            dev: None,
            post: None,
        }
    }

    /// Construct a version from its parts, validating the release tuple.
    pub fn from_parts(
        release: Vec<u64>,
        pre: Option<(PreLabel, u64)>,
        dev: Option<u64>,
        post: Option<u64>,
    ) -> Result<Self> {
        if release.is_empty() {
            return Err(ReleasyError::version("Release tuple must not be empty"));
        }
        Ok(Version {
            release,
            pre,
            dev,
            post,
        })
    }

    /// Parse a version string, tolerating a leading 'v'/'V' tag prefix.
    ///
    /// Accepts the canonical forms this tool emits plus common alias
    /// spellings, e.g. "1.4.0", "v1.4.0rc2", "0.9.0.dev3", "2.1.0.post1",
    /// "1.0.0-alpha.2".
    pub fn parse(input: &str) -> Result<Self> {
        let pattern = r"(?i)^v?(?P<release>\d+(?:\.\d+)*)(?:[._-]?(?P<pre_l>alpha|beta|preview|pre|rc|a|b|c)[._-]?(?P<pre_n>\d+)?)?(?P<post>[._-]?post[._-]?(?P<post_n>\d+)?)?(?P<dev>[._-]?dev[._-]?(?P<dev_n>\d+)?)?$";
        let re = Regex::new(pattern)
            .map_err(|e| ReleasyError::version(format!("Invalid version pattern: {}", e)))?;

        let captures = re
            .captures(input.trim())
            .ok_or_else(|| ReleasyError::version(format!("Invalid version format: '{}'", input)))?;

        let release = captures
            .name("release")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    ReleasyError::version(format!("Invalid release component: '{}'", part))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        let pre = match captures.name("pre_l") {
            Some(label) => {
                let label = label.as_str().parse::<PreLabel>()?;
                let number = parse_counter(captures.name("pre_n").map(|m| m.as_str()))?;
                Some((label, number))
            }
            None => None,
        };

        // An unnumbered qualifier ("1.0.post") counts as iteration 0
        let post = if captures.name("post").is_some() {
            Some(parse_counter(captures.name("post_n").map(|m| m.as_str()))?)
        } else {
            None
        };

        let dev = if captures.name("dev").is_some() {
            Some(parse_counter(captures.name("dev_n").map(|m| m.as_str()))?)
        } else {
            None
        };

        Version::from_parts(release, pre, dev, post)
    }

    /// The release tuple as parsed (may be shorter or longer than 3).
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Major component (zero when the tuple is shorter).
    pub fn major(&self) -> u64 {
        self.component(0)
    }

    /// Minor component (zero when the tuple is shorter).
    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    /// Patch component (zero when the tuple is shorter).
    pub fn patch(&self) -> u64 {
        self.component(2)
    }

    /// The pre-release qualifier, if any.
    pub fn pre(&self) -> Option<(PreLabel, u64)> {
        self.pre
    }

    /// The development-release counter, if any.
    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// The post-release counter, if any.
    pub fn post(&self) -> Option<u64> {
        self.post
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    fn component(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    // Qualifier keys for the total order. At an equal release tuple the
    // precedence is: dev-only < pre-release < final < post-release, and a
    // dev qualifier sorts a variant before the same variant without it.
    fn pre_key(&self) -> PreKey {
        match self.pre {
            Some((label, number)) => PreKey::Pre(label, number),
            None if self.post.is_none() && self.dev.is_some() => PreKey::DevOnly,
            None => PreKey::Final,
        }
    }

    fn dev_key(&self) -> DevKey {
        match self.dev {
            Some(number) => DevKey::Dev(number),
            None => DevKey::Release,
        }
    }
}

/// Pre-release position at an equal release tuple.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    DevOnly,
    Pre(PreLabel, u64),
    Final,
}

/// A dev snapshot sorts before the corresponding non-dev variant.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Release,
}

fn parse_counter(digits: Option<&str>) -> Result<u64> {
    match digits {
        Some(digits) => digits
            .parse::<u64>()
            .map_err(|_| ReleasyError::version(format!("Invalid qualifier number: '{}'", digits))),
        None => Ok(0),
    }
}

/// Compare release tuples with zero-padding, so 1.4 == 1.4.0.
fn cmp_release(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_release(&self.release, &other.release)
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
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((label, number)) = self.pre {
            write!(f, "{}{}", label, number)?;
        }
        if let Some(number) = self.post {
            write!(f, ".post{}", number)?;
        }
        if let Some(number) = self.dev {
            write!(f, ".dev{}", number)?;
        }
        Ok(())
    }
}
