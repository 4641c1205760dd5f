use std::path::{Path, PathBuf};

use browserless_client::Viewport;
use launchwatch_common::{Config, Result};
use tracing::{info, warn};

use crate::backend::{BrowserlessBackend, ChromeBackend, ScreenshotBackend};

/// Product pages whose slug doesn't match the site path.
const CONSOLE_PATHS: &[(&str, &str)] = &[
    ("amazon-bedrock", "bedrock"),
    ("aws-lambda", "lambda"),
    ("amazon-s3", "s3"),
    ("amazon-ec2", "ec2"),
    ("amazon-rds", "rds"),
];

const CONSOLE_BASE: &str = "https://aws.amazon.com";

/// Public product page for a service name.
pub fn console_url(service_name: &str) -> String {
    let slug = slugify(service_name, '-');
    let path = CONSOLE_PATHS
        .iter()
        .find(|(known, _)| *known == slug)
        .map(|(_, path)| *path)
        .unwrap_or(slug.as_str());
    format!("{CONSOLE_BASE}/{path}")
}

/// Lowercase `[a-z0-9]` runs of `service_name` joined by `sep`. Anything else,
/// path separators included, only splits runs.
fn slugify(service_name: &str, sep: char) -> String {
    service_name
        .to_lowercase()
        .split(|c: char| !c.is_ascii_lowercase() && !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

/// Captures the product page and its pricing page for each service.
pub struct ScreenshotCapture {
    backend: Box<dyn ScreenshotBackend>,
    dir: PathBuf,
}

impl ScreenshotCapture {
    pub fn new(backend: Box<dyn ScreenshotBackend>, dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            dir: dir.into(),
        }
    }

    /// Browserless when a URL is configured, otherwise local Chromium.
    pub fn from_config(config: &Config, dir: impl Into<PathBuf>) -> Result<Self> {
        let browser = &config.browser;
        let backend: Box<dyn ScreenshotBackend> = match browser.browserless_url.as_deref() {
            Some(base_url) => Box::new(BrowserlessBackend::new(
                base_url,
                browser.browserless_token.as_deref(),
                Viewport {
                    width: browser.window_width,
                    height: browser.window_height,
                },
            )?),
            None => Box::new(ChromeBackend::new(
                &browser.chrome_bin,
                browser.window_width,
                browser.window_height,
            )),
        };
        Ok(Self::new(backend, dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Screenshot `service_name`'s main and pricing pages. Failures are logged and
    /// skipped; the result holds only files that were written.
    pub async fn capture_service(&self, service_name: &str) -> Vec<PathBuf> {
        let stem = slugify(service_name, '_');
        if stem.is_empty() {
            warn!(service = service_name, "Service name has no usable characters, skipping screenshots");
            return Vec::new();
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %e, "Cannot create screenshot directory");
            return Vec::new();
        }

        let url = console_url(service_name);
        let pages = [
            (url.clone(), self.dir.join(format!("{stem}_main.png"))),
            (format!("{url}/pricing"), self.dir.join(format!("{stem}_pricing.png"))),
        ];

        let mut written = Vec::with_capacity(pages.len());
        for (page_url, dest) in pages {
            match self.backend.capture(&page_url, &dest).await {
                Ok(()) => written.push(dest),
                Err(e) => warn!(
                    service = service_name,
                    url = page_url.as_str(),
                    error = %format!("{e:#}"),
                    "Screenshot failed, skipping"
                ),
            }
        }

        info!(service = service_name, count = written.len(), "Screenshots captured");
        written
    }
}
