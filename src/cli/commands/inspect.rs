//! Inspect command implementation.
//!
//! Probes a single file and prints its properties and the ffmpeg commands
//! `process` would run, without touching anything.

use crate::core::planner;
use crate::core::workflow::ProxyWorkflow;
use crate::models::config::Config;
use crate::services::FfmpegTools;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Inspect a single media file.
pub fn inspect(file: &Path, config: &Config) -> Result<()> {
    if !file.is_file() {
        return Err(crate::Error::PathNotFound(file.display().to_string()));
    }

    println!("{} {}", "[INSPECT]".bold().cyan(), file.display());
    println!();

    let tools = FfmpegTools::from_config(&config.tools);
    let mut workflow = ProxyWorkflow::new(&tools, config.hwaccel);
    let props = workflow.inspect(file)?;

    println!("{}", "[Properties]".bold().green());
    println!("  {} {}", "Video stream:".bold(), props.has_video_stream);
    println!("  {} {}", "Audio stream:".bold(), props.has_audio_stream);
    if props.has_video_stream {
        println!("  {} {}", "Vertical:".bold(), props.is_vertical);
        println!("  {} {}", "Highest bit depth:".bold(), props.highest_bit_depth);
    }
    if props.has_audio_stream {
        println!(
            "  {} {}",
            "Unsupported audio:".bold(),
            props.unsupported_audio_format
        );
    }
    println!();

    let proxy = planner::proxy_path_for(file);
    if proxy.exists() {
        println!(
            "{} {}",
            "[SKIP] Proxy already exists:".yellow(),
            proxy.display()
        );
        return Ok(());
    }

    let plan = planner::build_proxy_plan(file, &proxy, &props, config.hwaccel);
    println!("{}", "[Proxy]".bold().green());
    println!("  {}", plan.to_string().cyan());

    if props.unsupported_audio_format {
        let original = planner::original_path_for(file);
        println!();
        println!("{}", "[Original]".bold().green());
        println!("  move {} -> {}", file.display(), original.display());
        if original.exists() {
            println!(
                "  {}",
                "[WARNING] Target already exists; processing would fail".yellow()
            );
        }
        let conversion = planner::build_original_conversion_plan(file);
        println!("  {}", conversion.to_string().cyan());
    }

    Ok(())
}
