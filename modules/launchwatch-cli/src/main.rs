use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use launchwatch_cli::{logging, Cli, OutputLayout, Pipeline};
use launchwatch_common::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Run failed");
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_env();
    cli.apply(&mut config);

    let layout = OutputLayout::new(&config.output_dir);
    layout.create()?;
    logging::init(&layout.log_path(), cli.verbose)?;

    info!("Launchwatch starting...");
    config.log_redacted();

    let pipeline = Pipeline::from_config(&config, layout)?;
    let summary = pipeline.run().await?;

    info!(
        announcements = summary.announcements,
        researched = summary.researched,
        screenshots = summary.screenshots,
        "Run complete"
    );
    println!("{summary}");
    Ok(())
}
