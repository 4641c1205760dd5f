use std::path::PathBuf;

use clap::Parser;
use launchwatch_common::Config;

#[derive(Debug, Parser)]
#[command(name = "launchwatch")]
#[command(about = "Collect cloud launch announcements and render them into a deck and report")]
#[command(version)]
pub struct Cli {
    /// TOML config file (defaults to ./launchwatch.toml when present)
    #[arg(long, env = "LAUNCHWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Blog page to scrape for announcements
    #[arg(long)]
    pub blog_url: Option<String>,

    /// Research at most this many announcements
    #[arg(long)]
    pub max_services: Option<usize>,

    /// Screenshot at most this many services
    #[arg(long)]
    pub max_screenshots: Option<usize>,

    /// Skip the screenshot step
    #[arg(long)]
    pub skip_screenshots: bool,

    /// Use the curated announcement list without scraping
    #[arg(long)]
    pub curated_only: bool,

    /// Root directory for data, screenshots, presentations and the log file
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags win over file and environment settings. Boolean flags only ever turn
    /// a behavior on.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.blog_url {
            config.blog_url = url.clone();
        }
        if let Some(n) = self.max_services {
            config.max_services = n;
        }
        if let Some(n) = self.max_screenshots {
            config.max_screenshots = n;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config.skip_screenshots |= self.skip_screenshots;
        config.curated_only |= self.curated_only;
    }
}
