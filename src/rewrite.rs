//! Regex substitution over working-tree files: the package version string
//! and copyright year headers.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::ReleaseConfig;
use crate::domain::Version;
use crate::error::{ReleasyError, Result};

/// Apply a regex substitution to a file, reporting whether it changed.
///
/// The replacement string supports capture-group expansion (`$1`).
pub fn sub_in_file(path: &Path, pattern: &Regex, replacement: &str) -> Result<bool> {
    let old_content = fs::read_to_string(path)?;
    let new_content = pattern.replace_all(&old_content, replacement);
    let changed = new_content != old_content;
    if changed {
        fs::write(path, new_content.as_ref())?;
    }
    Ok(changed)
}

/// Substitute the new version into the single tracked file carrying the
/// configured version string.
///
/// Exactly one tracked file must match `config.version_pattern`; zero or
/// multiple matches abort the release. Returns the workdir-relative path of
/// the rewritten file.
pub fn rewrite_package_version(
    root: &Path,
    tracked_files: &[PathBuf],
    config: &ReleaseConfig,
    new_version: &Version,
) -> Result<PathBuf> {
    let pattern = Regex::new(&config.version_pattern)
        .map_err(|e| ReleasyError::rewrite(format!("Invalid version pattern: {}", e)))?;

    let mut matched_files = Vec::new();
    for file in tracked_files {
        // Binary and deleted index entries are not version-file candidates
        let content = match fs::read_to_string(root.join(file)) {
            Ok(content) => content,
            Err(_) => continue,
        };
        if pattern.is_match(&content) {
            matched_files.push(file.clone());
        }
    }

    if matched_files.len() != 1 {
        return Err(ReleasyError::rewrite(format!(
            "Expected exactly one file matching the version pattern, found {}",
            matched_files.len()
        )));
    }

    let version_file = matched_files.remove(0);
    let replacement = config
        .version_replacement
        .replace("{version}", &new_version.to_string());
    sub_in_file(&root.join(&version_file), &pattern, &replacement)?;

    Ok(version_file)
}

/// Update copyright year headers in the given files.
///
/// Rewrites `Copyright (C) 2019-2023 ORG` to `Copyright (C) 2019-<year> ORG`
/// and `Copyright (C) 2022 ORG` to `Copyright (C) 2022-<year> ORG`, leaving
/// headers that already end in the current year alone. Missing or unreadable
/// files are skipped. Returns the files that changed.
pub fn rewrite_headers(
    root: &Path,
    files: &[PathBuf],
    org: &str,
    year: i32,
) -> Result<Vec<PathBuf>> {
    let year_str = year.to_string();
    let org_escaped = regex::escape(org);

    let range_pattern = Regex::new(&format!(
        r"Copyright \(C\) (\d{{4}})-(\d{{4}}) {}",
        org_escaped
    ))
    .map_err(|e| ReleasyError::rewrite(format!("Invalid header pattern: {}", e)))?;
    let single_pattern = Regex::new(&format!(r"Copyright \(C\) (\d{{4}}) {}", org_escaped))
        .map_err(|e| ReleasyError::rewrite(format!("Invalid header pattern: {}", e)))?;

    let mut changed_files = Vec::new();
    for file in files {
        let path = root.join(file);
        if !path.is_file() {
            continue;
        }
        let old_content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => continue,
        };

        let after_range = range_pattern.replace_all(&old_content, |caps: &regex::Captures| {
            if &caps[2] == year_str.as_str() {
                caps[0].to_string()
            } else {
                format!("Copyright (C) {}-{} {}", &caps[1], year, org)
            }
        });
        let new_content = single_pattern.replace_all(&after_range, |caps: &regex::Captures| {
            if &caps[1] == year_str.as_str() {
                caps[0].to_string()
            } else {
                format!("Copyright (C) {}-{} {}", &caps[1], year, org)
            }
        });

        if new_content.as_ref() != old_content.as_str() {
            fs::write(&path, new_content.as_ref())?;
            changed_files.push(file.clone());
        }
    }

    Ok(changed_files)
}
