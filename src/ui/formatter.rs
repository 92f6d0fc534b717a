//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! The `format_*` functions build the text; the `display_*` functions print it.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Build the "from -> to" block shown before confirmation.
pub fn format_proposed_version(current: &str, next: &str) -> String {
    format!(
        "\n{}\n  From: {}\n  To:   {}",
        style("Proposed Version Change:").bold(),
        style(current).red(),
        style(next).green()
    )
}

/// Display the proposed version change.
///
/// # Arguments
/// * `current` - Version currently in the manifest
/// * `next` - Version that will be written and tagged
pub fn display_proposed_version(current: &str, next: &str) {
    println!("{}", format_proposed_version(current, next));
}

pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ Warning:").yellow().bold(), warning)
}

/// Display a version notice in yellow.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

/// Summary line printed once every step has completed.
pub fn format_release_complete(version: &str, remote: &str) -> String {
    format!(
        "\n{} Released {} to {}\n",
        style("✓").green(),
        style(version).bold(),
        remote
    )
}
