//! Media Proxy CLI
//!
//! Generates editing proxies for a directory of media files.

use clap::Parser;
use media_proxy::cli::{
    args::{Cli, Commands},
    commands::{inspect, process},
};
use media_proxy::models::config::{self, Config};
use media_proxy::preflight;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;

    if !cli.skip_preflight {
        run_preflight_checks(&config)?;
    }

    match cli.command {
        Commands::Process {
            path,
            no_hwaccel,
            recursive,
            report,
        } => {
            if no_hwaccel {
                config.hwaccel = false;
            }
            if recursive {
                config.scan.recursive = true;
            }
            process::process(&path, &config, report.as_deref())?;
        }

        Commands::Inspect { file, no_hwaccel } => {
            if no_hwaccel {
                config.hwaccel = false;
            }
            inspect::inspect(&file, &config)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_proxy=debug")
    } else {
        EnvFilter::new("media_proxy=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(&config.tools);
    preflight::print_results(&results);

    println!();

    if let Err(e) = preflight::ensure_passed(&results) {
        anyhow::bail!("Preflight checks failed ({}). Fix the issues above and try again.", e);
    }

    Ok(())
}
