//! Process command implementation.
//!
//! Scans a directory and runs the proxy workflow for every media file,
//! optionally writing a JSON report of the run.

use crate::core::{batch, scanner};
use crate::core::workflow::ProxyWorkflow;
use crate::models::config::Config;
use crate::models::report::{BatchReport, FileOutcome};
use crate::services::FfmpegTools;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Generate proxies for a directory.
pub fn process(path: &Path, config: &Config, report_path: Option<&Path>) -> Result<()> {
    println!("{}", "[PROXY] Generating proxies...".bold().cyan());
    println!();

    println!("  {} {}", "Source:".bold(), path.display());
    println!(
        "  {} {}",
        "Encoder:".bold(),
        if config.hwaccel { "CUDA / NVENC" } else { "software (libx264)" }
    );
    println!("  {} {}", "Recursive:".bold(), config.scan.recursive);
    println!();

    let scan = scanner::scan_directory(path, &config.scan)?;
    if scan.files.is_empty() {
        println!("No media files found.");
        return Ok(());
    }

    println!("Found {} media files to process", scan.files.len());
    println!();

    let tools = FfmpegTools::from_config(&config.tools);
    let mut workflow = ProxyWorkflow::new(&tools, config.hwaccel);
    let report = batch::run_batch(&mut workflow, path, &scan.files)?;

    print_summary(&report);

    if let Some(report_path) = report_path {
        batch::save_report(&report, report_path)?;
        println!(
            "{} {}",
            "[OK] Report saved to:".bold().green(),
            report_path.display()
        );
    }

    Ok(())
}

/// Print the batch summary.
fn print_summary(report: &BatchReport) {
    let succeeded = report.count(FileOutcome::Succeeded);
    let skipped = report.count(FileOutcome::Skipped);
    let failed = report.count(FileOutcome::Failed);
    let remediated = report.files.iter().filter(|f| f.audio_remediated).count();

    println!();
    println!("{}", "[Summary]".bold().green());
    println!("  {} {}", "Proxies created:".bold(), succeeded);
    println!("  {} {}", "Originals converted to PCM:".bold(), remediated);
    println!("  {} {}", "Already had a proxy:".bold(), skipped);
    println!("  {} {}", "Failed:".bold(), failed);
    println!();

    if failed > 0 {
        println!("{}", "[FAILED]".bold().red());
        for file in report.failures() {
            println!(
                "  {} - {}",
                file.path.display(),
                file.reason.as_deref().unwrap_or("Unknown error")
            );
        }
        println!();
        println!(
            "{}",
            format!("[WARNING] {} file(s) failed", failed).yellow()
        );
    } else {
        println!("{}", "[OK] All files processed".green());
    }
}
