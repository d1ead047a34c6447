//! Version bump algebra and option-set derivation
//!
//! `bump` maps a version and a bump level onto the next version; the result
//! is always strictly greater than the input under the version ordering.
//! `available_bumps` derives the legal next versions a user may choose from.

use std::fmt;
use std::str::FromStr;

use crate::domain::version::Version;
use crate::error::{ReleasyError, Result};

/// The kind of version bump to apply.
///
/// `Pre`, `Dev` and `Post` are only legal on versions that already carry the
/// matching qualifier; [bump] rejects them otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
    Pre,
    Dev,
    Post,
}

impl FromStr for BumpLevel {
    type Err = ReleasyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(BumpLevel::Major),
            "minor" => Ok(BumpLevel::Minor),
            "patch" => Ok(BumpLevel::Patch),
            "pre" => Ok(BumpLevel::Pre),
            "dev" => Ok(BumpLevel::Dev),
            "post" => Ok(BumpLevel::Post),
            other => Err(ReleasyError::InvalidBumpLevel(other.to_string())),
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
            BumpLevel::Pre => "pre",
            BumpLevel::Dev => "dev",
            BumpLevel::Post => "post",
        };
        write!(f, "{}", name)
    }
}

/// Compute the next version for a bump level. Never mutates the input.
///
/// Release-level bumps normalize the release tuple to three components and
/// clear every qualifier:
/// - `Major`: (major+1, 0, 0)
/// - `Minor`: (major, minor+1, 0)
/// - `Patch`: (major, minor, patch+1)
///
/// Qualifier bumps increment the matching counter and leave everything else
/// untouched (e.g. `1.4.0rc1` -> `1.4.0rc2`). Requesting a qualifier bump on
/// a version without that qualifier fails with `UnsupportedQualifierBump`;
/// the option derivation in [available_bumps] never offers such a bump.
pub fn bump(version: &Version, level: BumpLevel) -> Result<Version> {
    match level {
        BumpLevel::Major => {
            Version::from_parts(vec![version.major() + 1, 0, 0], None, None, None)
        }
        BumpLevel::Minor => Version::from_parts(
            vec![version.major(), version.minor() + 1, 0],
            None,
            None,
            None,
        ),
        BumpLevel::Patch => Version::from_parts(
            vec![version.major(), version.minor(), version.patch() + 1],
            None,
            None,
            None,
        ),
        BumpLevel::Pre => {
            let (label, number) = version
                .pre()
                .ok_or_else(|| ReleasyError::unsupported_bump(level, version))?;
            Version::from_parts(
                version.release().to_vec(),
                Some((label, number + 1)),
                version.dev(),
                version.post(),
            )
        }
        BumpLevel::Dev => {
            let number = version
                .dev()
                .ok_or_else(|| ReleasyError::unsupported_bump(level, version))?;
            Version::from_parts(
                version.release().to_vec(),
                version.pre(),
                Some(number + 1),
                version.post(),
            )
        }
        BumpLevel::Post => {
            let number = version
                .post()
                .ok_or_else(|| ReleasyError::unsupported_bump(level, version))?;
            Version::from_parts(
                version.release().to_vec(),
                version.pre(),
                version.dev(),
                Some(number + 1),
            )
        }
    }
}

/// Derive the legal next versions for a given version, in presentation order.
///
/// Always offers major, minor and patch; a pre/dev/post option is included
/// only when the version already carries that qualifier. The returned order
/// is stable: major, minor, patch, pre, dev, post.
pub fn available_bumps(version: &Version) -> Result<Vec<(BumpLevel, Version)>> {
    let mut options = Vec::new();
    for level in [BumpLevel::Major, BumpLevel::Minor, BumpLevel::Patch] {
        options.push((level, bump(version, level)?));
    }
    if version.is_prerelease() {
        options.push((BumpLevel::Pre, bump(version, BumpLevel::Pre)?));
    }
    if version.is_devrelease() {
        options.push((BumpLevel::Dev, bump(version, BumpLevel::Dev)?));
    }
    if version.is_postrelease() {
        options.push((BumpLevel::Post, bump(version, BumpLevel::Post)?));
    }
    Ok(options)
}
