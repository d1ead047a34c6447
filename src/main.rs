use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Parser;

use releasy::changelog;
use releasy::config;
use releasy::domain::{available_bumps, TagPattern, Version};
use releasy::git_ops::GitRepo;
use releasy::rewrite;
use releasy::ui;

#[derive(clap::Parser)]
#[command(
    name = "releasy",
    about = "Cut a release: bump the version, regenerate the changelog, commit and tag"
)]
struct Args {
    #[arg(
        value_name = "NEW_TAG",
        help = "Tag for the new release (skips interactive version selection)"
    )]
    new_tag: Option<String>,

    #[arg(long, help = "Copyright holder used when updating year headers")]
    org: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("releasy {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(org) = args.org {
        config.org = org;
    }

    // Initialize git operations
    let git_repo = match GitRepo::discover() {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let workdir = git_repo.workdir()?;

    // The release is computed relative to the latest tag reachable from HEAD
    let old_tag = match git_repo.latest_tag() {
        Ok(Some(tag)) => tag,
        Ok(None) => {
            ui::display_error("No release tag found; create an initial tag first");
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&format!("Failed to find the latest tag: {}", e));
            std::process::exit(1);
        }
    };

    let tag_pattern = TagPattern::new(&config.tag_pattern);
    let current_version = match parse_tag_version(&tag_pattern, &old_tag) {
        Ok(version) => version,
        Err(e) => {
            ui::display_error(&format!(
                "Cannot parse version from tag '{}': {}",
                old_tag, e
            ));
            std::process::exit(1);
        }
    };

    // Either take the tag the user passed, or derive the legal bumps and ask
    let (new_version, new_tag) = match args.new_tag {
        Some(tag) => match Version::parse(&tag) {
            Ok(version) => (version, tag),
            Err(e) => {
                ui::display_error(&format!("Invalid tag '{}': {}", tag, e));
                std::process::exit(1);
            }
        },
        None => {
            let options = available_bumps(&current_version)?;
            let selected = match ui::select_bump(&current_version, &options) {
                Ok(version) => version,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            };
            let tag = tag_pattern.format(&selected);
            (selected, tag)
        }
    };

    ui::display_proposed_release(Some(&old_tag), &new_tag);

    if args.dry_run {
        ui::display_status("Dry run:");
        ui::display_success(&format!(
            "  Step 1: would update the version string to {}",
            new_version
        ));
        ui::display_success(&format!(
            "  Step 2: would refresh '{}' copyright headers in files changed since {}",
            config.org, old_tag
        ));
        ui::display_success(&format!(
            "  Step 3: would prepend a changelog section to {}",
            config.changelog.file
        ));
        ui::display_success(&format!(
            "  Step 4: would commit and create annotated tag {}",
            new_tag
        ));
        return Ok(());
    }

    let mut changed_files: BTreeSet<PathBuf> = BTreeSet::new();

    // Version string
    ui::display_status("Updating package version...");
    let tracked = match git_repo.tracked_files() {
        Ok(tracked) => tracked,
        Err(e) => {
            ui::display_error(&format!("Failed to list tracked files: {}", e));
            std::process::exit(1);
        }
    };
    match rewrite::rewrite_package_version(&workdir, &tracked, &config, &new_version) {
        Ok(file) => {
            ui::display_success(&format!("Updated version in {}", file.display()));
            changed_files.insert(file);
        }
        Err(e) => {
            ui::display_error(&format!("Failed to update the version string: {}", e));
            std::process::exit(1);
        }
    }

    // Copyright headers in files touched since the last release
    let current_year = Local::now().year();
    match git_repo.changed_files_since(&old_tag) {
        Ok(files) => {
            match rewrite::rewrite_headers(&workdir, &files, &config.org, current_year) {
                Ok(updated) => {
                    if !updated.is_empty() {
                        ui::display_success(&format!(
                            "Updated copyright headers in {} file(s)",
                            updated.len()
                        ));
                    }
                    changed_files.extend(updated);
                }
                Err(e) => {
                    ui::display_error(&format!("Failed to update copyright headers: {}", e));
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            // Header refresh is best-effort, matching the changelog warning path
            ui::display_warning(&format!(
                "Could not list files changed since '{}': {}",
                old_tag, e
            ));
        }
    }

    // Changelog
    let commits = match git_repo.commits_since(Some(&old_tag)) {
        Ok(commits) => commits,
        Err(e) => {
            ui::display_warning("Failed to get commits");
            ui::display_warning(&e.to_string());
            Vec::new()
        }
    };
    let section = changelog::render_section(&new_tag, &commits, Local::now().date_naive());
    let changelog_file = PathBuf::from(&config.changelog.file);
    if let Err(e) = changelog::insert_section(
        &workdir.join(&changelog_file),
        &config.changelog.header,
        &section,
    ) {
        ui::display_error(&format!("Failed to update the changelog: {}", e));
        std::process::exit(1);
    }
    changed_files.insert(changelog_file.clone());

    // Let the user polish the changelog before it is committed
    ui::open_editor(&workdir.join(&changelog_file));

    // Commit and tag
    let files: Vec<PathBuf> = changed_files.into_iter().collect();
    let message = config.commit_message_for(&new_tag);
    if let Err(e) = git_repo.stage_and_commit(&files, &message) {
        ui::display_error(&format!("Failed to commit release changes: {}", e));
        std::process::exit(1);
    }
    if let Err(e) = git_repo.create_annotated_tag(&new_tag, &message) {
        ui::display_error(&format!("Failed to create tag '{}': {}", new_tag, e));
        std::process::exit(1);
    }

    ui::display_success(&format!("Created {}", new_tag));
    Ok(())
}

/// Parse the version carried by a tag.
///
/// Tags normally follow the configured pattern; fall back to parsing the
/// raw tag so plain "vX.Y.Z" tags still work under a custom pattern.
fn parse_tag_version(pattern: &TagPattern, tag: &str) -> releasy::Result<Version> {
    match pattern.extract(tag) {
        Ok(version_part) => Version::parse(&version_part),
        Err(_) => Version::parse(tag),
    }
}
