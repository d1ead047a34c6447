//! Changelog section generation and injection.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{ReleasyError, Result};

/// Render the changelog section for a release.
///
/// Produces a header line `Version <tag> (released YYYY-MM-DD)` followed by
/// one bullet per commit (newest first); body lines are indented under
/// their subject.
pub fn render_section(tag: &str, commit_messages: &[String], date: NaiveDate) -> String {
    let mut section = format!("Version {} (released {})\n\n", tag, date.format("%Y-%m-%d"));

    let mut entries = Vec::new();
    for message in commit_messages {
        let mut lines = message.lines();
        let subject = match lines.next() {
            Some(subject) => subject,
            None => continue,
        };
        let mut entry = format!("- {}", subject);
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            entry.push_str("\n    ");
            entry.push_str(line);
        }
        entries.push(entry);
    }
    section.push_str(&entries.join("\n"));

    section
}

/// Inject a rendered section into the changelog, right after the header.
///
/// `header_pattern` is a regex whose first capture group anchors the
/// insertion point (default: the reStructuredText `Changes` heading).
/// Fails if the changelog has no matching header.
pub fn insert_section(path: &Path, header_pattern: &str, section: &str) -> Result<()> {
    let pattern = Regex::new(header_pattern)
        .map_err(|e| ReleasyError::rewrite(format!("Invalid changelog header pattern: {}", e)))?;

    let old_content = fs::read_to_string(path)?;
    if !pattern.is_match(&old_content) {
        return Err(ReleasyError::rewrite(format!(
            "Changelog header not found in {}",
            path.display()
        )));
    }

    let new_content = pattern.replace(&old_content, |caps: &regex::Captures| {
        let anchor = caps.get(1).map(|m| m.as_str()).unwrap_or(&caps[0]);
        format!("{}\n{}\n", anchor, section)
    });
    fs::write(path, new_content.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChangelogConfig;
    use tempfile::TempDir;

    fn release_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    #[test]
    fn test_render_section_header_and_bullets() {
        let commits = vec!["feat: add thing".to_string(), "fix: close hole".to_string()];
        let section = render_section("v1.5.0", &commits, release_date());
        assert_eq!(
            section,
            "Version v1.5.0 (released 2026-08-04)\n\n- feat: add thing\n- fix: close hole"
        );
    }

    #[test]
    fn test_render_section_indents_body() {
        let commits = vec!["fix: something\n\nLonger explanation".to_string()];
        let section = render_section("v1.0.1", &commits, release_date());
        assert!(section.ends_with("- fix: something\n    Longer explanation"));
    }

    #[test]
    fn test_render_section_no_commits() {
        let section = render_section("v2.0.0", &[], release_date());
        assert_eq!(section, "Version v2.0.0 (released 2026-08-04)\n\n");
    }

    #[test]
    fn test_insert_section_after_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGES.rst");
        fs::write(
            &path,
            "Changes\n=======\n\nVersion v1.0.0 (released 2024-01-01)\n\n- old entry\n",
        )
        .unwrap();

        let config = ChangelogConfig::default();
        insert_section(&path, &config.header, "Version v1.1.0 (released 2026-08-04)\n\n- new")
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let new_pos = content.find("Version v1.1.0").unwrap();
        let old_pos = content.find("Version v1.0.0").unwrap();
        assert!(content.starts_with("Changes\n=======\n"));
        assert!(new_pos < old_pos);
        assert!(content.contains("- new"));
        assert!(content.contains("- old entry"));
    }

    #[test]
    fn test_insert_section_missing_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CHANGES.rst");
        fs::write(&path, "No heading here\n").unwrap();

        let config = ChangelogConfig::default();
        let result = insert_section(&path, &config.header, "Version v1.1.0");
        assert!(result.is_err());
    }
}
