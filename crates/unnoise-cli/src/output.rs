//! Report rendering

use colored::Colorize;

use unnoise_core::{FileOutcome, RunReport};

use crate::error::Result;

/// Print the report as pretty JSON, with the summary alongside.
pub fn print_json(report: &RunReport) -> Result<()> {
    let value = serde_json::json!({
        "dry_run": report.dry_run,
        "files": report.files,
        "failures": report.failures,
        "summary": report.summary(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Print one line per file followed by a summary line.
pub fn print_human(report: &RunReport) {
    for outcome in &report.files {
        println!("{}", outcome_line(outcome, report.dry_run));
    }
    for failure in &report.failures {
        println!(
            "{} {}: {}",
            "Failed".red().bold(),
            failure.path.as_str().yellow(),
            failure.error
        );
    }

    let summary = report.summary();
    let prefix = if report.dry_run {
        format!("{} ", "[dry-run]".cyan())
    } else {
        String::new()
    };
    println!();
    println!(
        "{prefix}{} file(s): {} rewritten, {} skipped, {} failed, {} chunk(s) reverted",
        summary.files, summary.rewritten, summary.skipped, summary.failed, summary.reversions
    );
}

fn outcome_line(outcome: &FileOutcome, dry_run: bool) -> String {
    match outcome {
        FileOutcome::Processed(report) if report.rewritten => {
            let verb = if dry_run { "Would clean" } else { "Cleaned" };
            format!(
                "{} {}: reverted {} chunk(s) of noise",
                verb.green().bold(),
                report.path.as_str().yellow(),
                report.reversions
            )
        }
        FileOutcome::Processed(report) if report.reversions > 0 => format!(
            "{} {}: no effective changes to write",
            "Checked".blue().bold(),
            report.path.as_str().yellow()
        ),
        FileOutcome::Processed(report) => format!(
            "{} {}: no noise found",
            "Checked".blue().bold(),
            report.path.as_str().yellow()
        ),
        FileOutcome::Skipped { path, reason } => format!(
            "{} {}: {}",
            "Skipping".dimmed(),
            path.as_str().yellow(),
            reason
        ),
    }
}
