use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{LaunchwatchError, Result};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "launchwatch.toml";

/// Pipeline configuration.
///
/// Loaded from an optional TOML file, then overridden by environment variables
/// (secrets and binary paths) and finally by CLI flags in the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Blog page scraped for announcements.
    pub blog_url: String,
    /// Origin that relative announcement links are resolved against.
    pub link_base: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,

    pub max_services: usize,
    pub max_screenshots: usize,
    pub skip_screenshots: bool,
    /// Skip blog scraping and always use the curated announcement list.
    pub curated_only: bool,

    /// Pause between researching successive services.
    pub research_delay_ms: u64,
    /// Pause between screenshotting successive services.
    pub screenshot_delay_ms: u64,

    pub output_dir: PathBuf,
    pub deck_name: String,

    /// Replaces the embedded curated announcement list.
    pub curated_path: Option<PathBuf>,
    /// Replaces the embedded research registry.
    pub registry_path: Option<PathBuf>,

    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Chromium binary for local screenshots.
    pub chrome_bin: String,
    /// When set, screenshots go through Browserless instead of a local Chromium.
    pub browserless_url: Option<String>,
    pub browserless_token: Option<String>,
    /// Fetch the blog through Browserless /content so client-rendered posts are visible.
    pub render_blog: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blog_url: "https://www.aboutamazon.com/aws-reinvent-news-updates".to_string(),
            link_base: "https://aws.amazon.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            request_timeout_secs: 30,
            max_services: 10,
            max_screenshots: 5,
            skip_screenshots: false,
            curated_only: false,
            research_delay_ms: 1000,
            screenshot_delay_ms: 2000,
            output_dir: PathBuf::from("outputs"),
            deck_name: "AWS_reInvent_2025_Services".to_string(),
            curated_path: None,
            registry_path: None,
            browser: BrowserConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_bin: "chromium".to_string(),
            browserless_url: None,
            browserless_token: None,
            render_blog: false,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists,
    /// or fall back to defaults. An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LaunchwatchError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|e| LaunchwatchError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LaunchwatchError::Config(e.to_string()))
    }

    /// Apply environment overrides: `CHROME_BIN`, `BROWSERLESS_URL`, `BROWSERLESS_TOKEN`.
    pub fn apply_env(&mut self) {
        if let Some(bin) = non_empty_env("CHROME_BIN") {
            self.browser.chrome_bin = bin;
        }
        if let Some(url) = non_empty_env("BROWSERLESS_URL") {
            self.browser.browserless_url = Some(url);
        }
        if let Some(token) = non_empty_env("BROWSERLESS_TOKEN") {
            self.browser.browserless_token = Some(token);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn research_delay(&self) -> Duration {
        Duration::from_millis(self.research_delay_ms)
    }

    pub fn screenshot_delay(&self) -> Duration {
        Duration::from_millis(self.screenshot_delay_ms)
    }

    /// Log the effective configuration with secrets masked.
    pub fn log_redacted(&self) {
        info!(
            blog_url = self.blog_url.as_str(),
            max_services = self.max_services,
            max_screenshots = self.max_screenshots,
            skip_screenshots = self.skip_screenshots,
            curated_only = self.curated_only,
            output_dir = %self.output_dir.display(),
            chrome_bin = self.browser.chrome_bin.as_str(),
            browserless_url = self.browser.browserless_url.as_deref().unwrap_or("-"),
            browserless_token = redact(self.browser.browserless_token.as_deref()),
            "Configuration loaded"
        );
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn redact(secret: Option<&str>) -> &'static str {
    match secret {
        Some(_) => "***",
        None => "-",
    }
}
