// tests/release_flow_test.rs
//
// Exercises the release workflow against a real (temporary) git repository:
// tag discovery, commit collection, file rewriting, changelog injection,
// and the final commit + annotated tag.

use std::fs;
use std::path::PathBuf;

use chrono::{Datelike, Local};
use git2::Repository;
use tempfile::TempDir;

use releasy::changelog;
use releasy::config::ReleaseConfig;
use releasy::domain::{bump, BumpLevel, TagPattern, Version};
use releasy::git_ops::GitRepo;
use releasy::rewrite;

fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().expect("Could not get index");
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .expect("Could not add files");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get signature");

    match repo.head() {
        Ok(head) => {
            let parent = head.peel_to_commit().expect("Could not get parent");
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
                .expect("Could not create commit");
        }
        Err(_) => {
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
                .expect("Could not create initial commit");
        }
    }
}

// A repo with one tagged release (v1.4.0) and one commit after it
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    fs::write(
        temp_dir.path().join("version.py"),
        "__version__ = \"1.4.0\"\n",
    )
    .expect("Could not write version file");
    fs::write(
        temp_dir.path().join("CHANGES.rst"),
        "Changes\n=======\n\nVersion v1.4.0 (released 2024-01-01)\n\n- initial release\n",
    )
    .expect("Could not write changelog");
    fs::write(
        temp_dir.path().join("module.py"),
        "# Copyright (C) 2019-2023 CERN\n\nprint('hi')\n",
    )
    .expect("Could not write module");

    commit_all(&repo, "Initial commit");

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight("v1.4.0", head.as_object(), false)
        .expect("Could not create tag");

    fs::write(
        temp_dir.path().join("module.py"),
        "# Copyright (C) 2019-2023 CERN\n\nprint('hello')\n",
    )
    .expect("Could not update module");
    commit_all(&repo, "feat: greet more warmly");

    temp_dir
}

#[test]
fn test_latest_tag_and_commit_collection() {
    let temp_dir = setup_test_repo();
    let git_repo = GitRepo::open(temp_dir.path()).unwrap();

    assert_eq!(git_repo.latest_tag().unwrap(), Some("v1.4.0".to_string()));

    let commits = git_repo.commits_since(Some("v1.4.0")).unwrap();
    assert_eq!(commits, vec!["feat: greet more warmly".to_string()]);

    // without a bound the whole history comes back, newest first
    let all_commits = git_repo.commits_since(None).unwrap();
    assert_eq!(
        all_commits,
        vec![
            "feat: greet more warmly".to_string(),
            "Initial commit".to_string()
        ]
    );
}

#[test]
fn test_changed_files_since_tag() {
    let temp_dir = setup_test_repo();
    let git_repo = GitRepo::open(temp_dir.path()).unwrap();

    let changed = git_repo.changed_files_since("v1.4.0").unwrap();
    assert_eq!(changed, vec![PathBuf::from("module.py")]);
}

#[test]
fn test_full_release_flow() {
    let temp_dir = setup_test_repo();
    let git_repo = GitRepo::open(temp_dir.path()).unwrap();
    let workdir = git_repo.workdir().unwrap();
    let config = ReleaseConfig::default();

    // derive the next version from the latest tag
    let old_tag = git_repo.latest_tag().unwrap().unwrap();
    let current = Version::parse(&old_tag).unwrap();
    let next = bump(&current, BumpLevel::Minor).unwrap();
    assert_eq!(next.to_string(), "1.5.0");
    let new_tag = TagPattern::new(&config.tag_pattern).format(&next);
    assert_eq!(new_tag, "v1.5.0");

    // version string rewrite finds the single matching tracked file
    let tracked = git_repo.tracked_files().unwrap();
    let version_file =
        rewrite::rewrite_package_version(&workdir, &tracked, &config, &next).unwrap();
    assert_eq!(version_file, PathBuf::from("version.py"));
    assert_eq!(
        fs::read_to_string(workdir.join("version.py")).unwrap(),
        "__version__ = \"1.5.0\"\n"
    );

    // copyright headers refresh only in files touched since the tag
    let year = Local::now().year();
    let changed = git_repo.changed_files_since(&old_tag).unwrap();
    let updated = rewrite::rewrite_headers(&workdir, &changed, &config.org, year).unwrap();
    assert_eq!(updated, vec![PathBuf::from("module.py")]);
    assert!(fs::read_to_string(workdir.join("module.py"))
        .unwrap()
        .contains(&format!("Copyright (C) 2019-{} CERN", year)));

    // changelog section lands right after the header, above the old entry
    let commits = git_repo.commits_since(Some(&old_tag)).unwrap();
    let section = changelog::render_section(&new_tag, &commits, Local::now().date_naive());
    changelog::insert_section(
        &workdir.join("CHANGES.rst"),
        &config.changelog.header,
        &section,
    )
    .unwrap();
    let content = fs::read_to_string(workdir.join("CHANGES.rst")).unwrap();
    assert!(content.starts_with("Changes\n=======\n"));
    assert!(content.contains("- feat: greet more warmly"));
    assert!(content.find("Version v1.5.0").unwrap() < content.find("Version v1.4.0").unwrap());

    // commit the release and create the annotated tag
    let files = vec![
        PathBuf::from("CHANGES.rst"),
        PathBuf::from("module.py"),
        PathBuf::from("version.py"),
    ];
    let message = config.commit_message_for(&new_tag);
    git_repo.stage_and_commit(&files, &message).unwrap();
    git_repo.create_annotated_tag(&new_tag, &message).unwrap();

    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap(), message);

    // the tag is annotated and now the latest
    let tag_ref = repo.find_reference("refs/tags/v1.5.0").unwrap();
    assert!(tag_ref.peel(git2::ObjectType::Tag).is_ok());
    assert_eq!(git_repo.latest_tag().unwrap(), Some("v1.5.0".to_string()));
}

#[test]
fn test_create_tag_twice_fails() {
    let temp_dir = setup_test_repo();
    let git_repo = GitRepo::open(temp_dir.path()).unwrap();

    git_repo.create_annotated_tag("v9.9.9", "test tag").unwrap();
    assert!(git_repo.create_annotated_tag("v9.9.9", "test tag").is_err());
}
