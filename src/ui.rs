use console::style;

use crate::updater::VersionChange;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the version changes of one update phase
pub fn display_changes(title: &str, changes: &[VersionChange]) {
    if changes.is_empty() {
        println!("\n{} (no projects changed)", style(title).bold());
        return;
    }

    println!("\n{}", style(title).bold());
    for change in changes {
        println!(
            "  {}: {} -> {}",
            change.project,
            style(&change.previous).red(),
            style(&change.next).green()
        );
    }
}

pub fn display_dry_run_notice() {
    println!(
        "\n{} dry run - no project files were written",
        style("!").yellow().bold()
    );
}
