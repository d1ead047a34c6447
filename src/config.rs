use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleasyError, Result};

/// Represents the complete configuration for releasy.
///
/// Covers the copyright holder, tag naming, version-string rewriting,
/// changelog placement and the release commit message.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_org")]
    pub org: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_version_pattern")]
    pub version_pattern: String,

    #[serde(default = "default_version_replacement")]
    pub version_replacement: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

/// Returns the default copyright holder.
fn default_org() -> String {
    "CERN".to_string()
}

/// Returns the default tag naming pattern.
fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

/// Returns the default regex locating the version string in exactly one file.
fn default_version_pattern() -> String {
    r#"__version__ = "(.+)""#.to_string()
}

/// Returns the default replacement template for the version string.
fn default_version_replacement() -> String {
    r#"__version__ = "{version}""#.to_string()
}

/// Returns the default release commit message template.
fn default_commit_message() -> String {
    "📦 release: {tag}".to_string()
}

/// Configuration for changelog regeneration.
///
/// `header` is a regex with one capture group marking the anchor the new
/// section is injected after.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_file")]
    pub file: String,

    #[serde(default = "default_changelog_header")]
    pub header: String,
}

fn default_changelog_file() -> String {
    "CHANGES.rst".to_string()
}

fn default_changelog_header() -> String {
    "(Changes\n=======\n)".to_string()
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            file: default_changelog_file(),
            header: default_changelog_header(),
        }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            org: default_org(),
            tag_pattern: default_tag_pattern(),
            version_pattern: default_version_pattern(),
            version_replacement: default_version_replacement(),
            commit_message: default_commit_message(),
            changelog: ChangelogConfig::default(),
        }
    }
}

impl ReleaseConfig {
    /// Render the release commit message for a tag.
    pub fn commit_message_for(&self, tag: &str) -> String {
        self.commit_message.replace("{tag}", tag)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasy.toml` in current directory
/// 3. `~/.config/.releasy.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasy.toml").exists() {
        fs::read_to_string("./releasy.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasy.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(ReleaseConfig::default());
        }
    } else {
        return Ok(ReleaseConfig::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| ReleasyError::config(format!("Invalid configuration: {}", e)))
}
