// tests/config_test.rs
use releasy::config::{load_config, ReleaseConfig};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = ReleaseConfig::default();
    assert_eq!(config.org, "CERN");
    assert_eq!(config.tag_pattern, "v{version}");
    assert_eq!(config.changelog.file, "CHANGES.rst");
    assert_eq!(config.commit_message_for("v1.2.3"), "📦 release: v1.2.3");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
org = "Acme"
tag_pattern = "release-{version}"
commit_message = "release: {tag}"

[changelog]
file = "CHANGELOG.rst"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.org, "Acme");
    assert_eq!(config.tag_pattern, "release-{version}");
    assert_eq!(config.changelog.file, "CHANGELOG.rst");
    // unset fields keep their defaults
    assert!(config.version_pattern.contains("__version__"));
    assert_eq!(config.changelog.header, "(Changes\n=======\n)");
    assert_eq!(config.commit_message_for("v2.0.0"), "release: v2.0.0");
}

#[test]
fn test_load_invalid_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"org = [not toml").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("releasy.toml"), "org = \"Acme\"\n").unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.unwrap().org, "Acme");
}
