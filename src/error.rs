use thiserror::Error;

/// Unified error type for releasy operations
#[derive(Error, Debug)]
pub enum ReleasyError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("File rewrite error: {0}")]
    Rewrite(String),

    #[error("Unknown bump level: '{0}'")]
    InvalidBumpLevel(String),

    #[error("Cannot bump '{level}' on version {version}: qualifier not present")]
    UnsupportedQualifierBump { level: String, version: String },

    #[error("Version selection cancelled")]
    SelectionCancelled,
}

/// Convenience type alias for Results in releasy
pub type Result<T> = std::result::Result<T, ReleasyError>;

impl ReleasyError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleasyError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleasyError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleasyError::Tag(msg.into())
    }

    /// Create a repository error with context
    pub fn repo(msg: impl Into<String>) -> Self {
        ReleasyError::Repo(msg.into())
    }

    /// Create a file rewrite error with context
    pub fn rewrite(msg: impl Into<String>) -> Self {
        ReleasyError::Rewrite(msg.into())
    }

    /// Create an unsupported qualifier bump error from the offending level and version
    pub fn unsupported_bump(level: impl std::fmt::Display, version: impl std::fmt::Display) -> Self {
        ReleasyError::UnsupportedQualifierBump {
            level: level.to_string(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleasyError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleasyError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(ReleasyError::version("test")
            .to_string()
            .contains("Version"));
        assert!(ReleasyError::tag("test").to_string().contains("Tag"));
        assert!(ReleasyError::rewrite("test").to_string().contains("rewrite"));
    }

    #[test]
    fn test_invalid_bump_level_names_offender() {
        let err = ReleasyError::InvalidBumpLevel("mega".to_string());
        assert!(err.to_string().contains("mega"));
    }

    #[test]
    fn test_unsupported_bump_names_level_and_version() {
        let err = ReleasyError::unsupported_bump("post", "1.4.2");
        let msg = err.to_string();
        assert!(msg.contains("post"));
        assert!(msg.contains("1.4.2"));
    }

    #[test]
    fn test_selection_cancelled_display() {
        assert!(ReleasyError::SelectionCancelled
            .to_string()
            .contains("cancelled"));
    }
}
