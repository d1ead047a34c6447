//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

use console::style;

use crate::domain::{BumpLevel, Version};
use crate::error::{ReleasyError, Result};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_proposed_release, display_status, display_success, display_warning,
    format_bump_option,
};

/// Prompts the user to pick the next version from the derived bump options.
///
/// Options are shown as a numbered list of `"<version> (<level>)"` entries
/// and chosen by 1-based index. Empty, non-numeric or out-of-range input is
/// treated as aborting the selection and fails with `SelectionCancelled`;
/// no file has been touched at that point.
///
/// # Arguments
/// * `current` - The version being bumped, shown in the prompt
/// * `options` - Bump candidates in presentation order
///
/// # Returns
/// * `Ok(Version)` - The selected next version
/// * `Err(SelectionCancelled)` - If the user aborts without choosing
pub fn select_bump(current: &Version, options: &[(BumpLevel, Version)]) -> Result<Version> {
    println!(
        "\n{}",
        style(format!("Options to bump version {}:", current)).bold()
    );
    for (i, (level, candidate)) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, format_bump_option(candidate, *level));
    }

    print!("\nSelect a version (1-{}): ", options.len());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let selection = input.trim();

    if selection.is_empty() {
        return Err(ReleasyError::SelectionCancelled);
    }

    let index = selection.parse::<usize>().unwrap_or(0);
    if index > 0 && index <= options.len() {
        Ok(options[index - 1].1.clone())
    } else {
        Err(ReleasyError::SelectionCancelled)
    }
}

/// Opens `$EDITOR` on a file so the user can touch up the changelog.
///
/// A missing `$EDITOR` or a failing editor downgrades to a warning; the
/// release continues with the generated content.
pub fn open_editor(path: &Path) {
    let editor = match std::env::var("EDITOR") {
        Ok(editor) if !editor.is_empty() => editor,
        _ => {
            display_status(&format!(
                "$EDITOR not set, keeping generated {}",
                path.display()
            ));
            return;
        }
    };

    match Command::new(&editor).arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            display_warning(&format!("Editor '{}' exited with {}", editor, status));
        }
        Err(e) => {
            display_warning(&format!("Could not launch editor '{}': {}", editor, e));
        }
    }
}
