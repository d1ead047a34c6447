//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::domain::{BumpLevel, Version};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Render a bump candidate as presented in the selection list.
pub fn format_bump_option(version: &Version, level: BumpLevel) -> String {
    format!("{} ({})", version, level)
}

/// Show the release transition the user is about to make.
pub fn display_proposed_release(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Release:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}
