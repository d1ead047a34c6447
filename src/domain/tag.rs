use regex::Regex;

use crate::domain::version::Version;
use crate::error::{ReleasyError, Result};

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Format a version according to the pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    /// Extract the version part of a tag that matches this pattern
    pub fn extract(&self, tag: &str) -> Result<String> {
        let re = self.to_regex()?;
        let captures = re
            .captures(tag)
            .ok_or_else(|| ReleasyError::tag(format!("Tag '{}' does not match pattern '{}'", tag, self.pattern)))?;
        Ok(captures[1].to_string())
    }

    /// Validate whether a tag matches this pattern
    pub fn matches(&self, tag: &str) -> Result<bool> {
        Ok(self.to_regex()?.is_match(tag))
    }

    fn to_regex(&self) -> Result<Regex> {
        if !self.pattern.contains("{version}") {
            return Err(ReleasyError::tag(
                "Pattern must contain {version} placeholder",
            ));
        }

        // Escape everything, then widen {version} to the version grammar
        // (digits, dots, qualifier letters and separators).
        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(r"\{version\}", r"([0-9][0-9A-Za-z._\-]*)");

        Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| ReleasyError::tag(format!("Invalid tag pattern: {}", e)))
    }
}
