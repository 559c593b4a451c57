//! Update command implementation

use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use asminfo_core::{FileUpdate, UpdateEngine, UpdateOptions, UpdateSummary};

use crate::error::Result;

/// Run the update command.
///
/// In dry-run mode every file's update is computed and shown as a diff but
/// nothing is written.
pub fn run_update(options: UpdateOptions, dry_run: bool, json: bool) -> Result<()> {
    let engine = UpdateEngine::new(options);

    if dry_run {
        let updates = engine.preview()?;

        if json {
            let mut summary = UpdateSummary::default();
            for update in &updates {
                summary.record(update);
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_previews(&updates);
        }

        return Ok(());
    }

    let summary = engine.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_previews(updates: &[FileUpdate]) {
    for update in updates {
        if update.original == update.updated {
            println!(
                "{} {}",
                "unchanged".dimmed(),
                update.result.file.display()
            );
            continue;
        }

        println!(
            "{} {}",
            "would update".yellow().bold(),
            update.result.file.display()
        );
        print_diff(&update.original, &update.updated);
    }
}

fn print_diff(original: &str, updated: &str) {
    let diff = TextDiff::from_lines(original, updated);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => print!("{}", format!("-{change}").red()),
            ChangeTag::Insert => print!("{}", format!("+{change}").green()),
            ChangeTag::Equal => {}
        }
    }
}

fn print_summary(summary: &UpdateSummary) {
    for result in &summary.results {
        println!("{} {}", "updated".green().bold(), result.file.display());
        if let Some(version) = result.assembly_version {
            println!("   assembly version: {}", version.to_string().cyan());
        }
        if let Some(version) = result.file_version {
            println!("   file version:     {}", version.to_string().cyan());
        }
    }

    if let Some(max) = summary.max_assembly_version {
        println!(
            "{} max assembly version {}",
            "=>".blue().bold(),
            max.to_string().cyan()
        );
    }
}
