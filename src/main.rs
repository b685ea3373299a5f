// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use readme_sync::utils::logging::{format_error, format_info, format_success, format_warning};
use readme_sync::{Config, DEFAULT_CONFIG_PATH, ReadmeSynchronizer, ReportStatus, SyncOptions, SyncOutcome};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "readme_sync")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Synchronize README files from source repositories into the documentation tree", long_about = None)]
struct Cli {
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Show what would be done without modifying any file
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Also scan every documentation page and repair broken image references
    #[arg(long, action = ArgAction::SetTrue)]
    fix_all_images: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    readme_sync::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("README synchronization");

    if !cli.config.exists() {
        error!("Configuration file not found: {}", cli.config.display());
        bail!("Configuration file not found: {}", cli.config.display());
    }

    info!("Loading configuration from: {}", cli.config.display());
    let config = Config::load(&cli.config).context("Failed to load configuration")?;

    let options = SyncOptions {
        dry_run: cli.dry_run,
        fix_all_images: cli.fix_all_images,
        show_progress: std::io::stderr().is_terminal() && !cli.verbose,
        colored: cli.color,
    };

    let synchronizer =
        ReadmeSynchronizer::new(config, options).context("Failed to initialize synchronizer")?;
    let outcome = synchronizer.sync_all().context("Synchronization failed")?;

    print_summary(&outcome, cli.dry_run);
    Ok(())
}

fn print_summary(outcome: &SyncOutcome, dry_run: bool) {
    if let ReportStatus::Preview(report) = &outcome.report {
        println!("\n{}", "=".repeat(80));
        println!("DOCUMENTATION NEEDS REPORT PREVIEW:");
        println!("{}", "=".repeat(80));
        println!("{}", report);
    }

    println!();
    println!(
        "{}",
        format_success(&format!("Processed {} README files", outcome.processed))
    );

    if outcome.warnings > 0 {
        println!(
            "{}",
            format_warning(&format!("{} pages need more content", outcome.warnings))
        );
    }

    if outcome.has_errors() {
        println!(
            "{}",
            format_error(&format!("{} mappings failed, see the log above", outcome.errors))
        );
    }

    let images = &outcome.images;
    println!(
        "{}",
        format_info(&format!(
            "Images: {} rewritten, {} copied, {} up to date, {} failed",
            images.rewritten, images.copied, images.up_to_date, images.failed
        ))
    );

    if let Some(repair) = &outcome.repair {
        println!(
            "{}",
            format_info(&format!(
                "Repair: {} of {} files fixed, {} images, {} references, {} unresolved",
                repair.files_fixed,
                repair.files_checked,
                repair.images_fixed,
                repair.references_updated,
                repair.unresolved
            ))
        );
    }

    if let ReportStatus::Written(path) = &outcome.report {
        println!(
            "{}",
            format_info(&format!("Documentation needs report: {}", path.display()))
        );
    }

    if dry_run {
        println!("{}", format_info("Dry run: no files were modified"));
    }
}
