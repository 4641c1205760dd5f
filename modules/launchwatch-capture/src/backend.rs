// Screenshot backends: a local headless Chromium, or a Browserless instance.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use browserless_client::{BrowserlessClient, Viewport};
use rand::Rng;
use tracing::{info, warn};

/// Max attempts for transient Chromium failures.
const CHROME_MAX_ATTEMPTS: u32 = 3;
/// Base backoff for Chromium retries. Actual delay is base * 3^attempt + jitter.
const CHROME_RETRY_BASE: Duration = Duration::from_secs(3);
const CHROME_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait ScreenshotBackend: Send + Sync {
    /// Render `url` and write a PNG to `dest`. On error nothing usable is left at `dest`.
    async fn capture(&self, url: &str, dest: &Path) -> Result<()>;
}

pub struct ChromeBackend {
    chrome_bin: String,
    window_width: u32,
    window_height: u32,
}

impl ChromeBackend {
    pub fn new(chrome_bin: &str, window_width: u32, window_height: u32) -> Self {
        info!(chrome_bin, window_width, window_height, "ChromeBackend initialized");
        Self {
            chrome_bin: chrome_bin.to_string(),
            window_width,
            window_height,
        }
    }

    async fn run_chrome(&self, url: &str, dest: &Path) -> Result<()> {
        let parsed = url::Url::parse(url).context("Invalid URL")?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("Only http/https URLs allowed, got: {}", parsed.scheme());
        }

        for attempt in 0..CHROME_MAX_ATTEMPTS {
            let tmp_dir = tempfile::tempdir().context("Failed to create temp profile dir")?;

            let result = tokio::time::timeout(
                CHROME_TIMEOUT,
                tokio::process::Command::new(&self.chrome_bin)
                    .args([
                        "--headless",
                        "--no-sandbox",
                        "--disable-gpu",
                        "--disable-dev-shm-usage",
                        "--hide-scrollbars",
                        &format!("--user-data-dir={}", tmp_dir.path().display()),
                        &format!("--window-size={},{}", self.window_width, self.window_height),
                        &format!("--screenshot={}", dest.display()),
                        url,
                    ])
                    .output(),
            )
            .await;

            let retries_left = attempt + 1 < CHROME_MAX_ATTEMPTS;
            match result {
                Ok(Ok(output)) if output.status.success() => {
                    if screenshot_written(dest).await {
                        return Ok(());
                    }
                    if retries_left {
                        warn!(url, attempt = attempt + 1, "Chrome wrote no screenshot, retrying");
                        retry_with_backoff(attempt).await;
                        continue;
                    }
                    anyhow::bail!("Chrome exited cleanly but wrote no screenshot for {url}");
                }
                Ok(Ok(output)) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    if is_transient_error(&stderr) && retries_left {
                        warn!(url, attempt = attempt + 1, "Chrome hit a transient error, retrying");
                        retry_with_backoff(attempt).await;
                        continue;
                    }
                    anyhow::bail!("Chrome exited with {} for {url}: {}", output.status, stderr.trim());
                }
                Ok(Err(e)) => {
                    if is_transient_error(&e.to_string()) && retries_left {
                        warn!(url, attempt = attempt + 1, error = %e, "Chrome launch failed, retrying");
                        retry_with_backoff(attempt).await;
                        continue;
                    }
                    return Err(e).with_context(|| {
                        format!("Failed to run {} for {url}", self.chrome_bin)
                    });
                }
                Err(_) => {
                    if retries_left {
                        warn!(url, attempt = attempt + 1, "Chrome timed out, retrying");
                        retry_with_backoff(attempt).await;
                        continue;
                    }
                    anyhow::bail!("Chrome timed out after {}s for {url}", CHROME_TIMEOUT.as_secs());
                }
            }
        }

        anyhow::bail!("Chrome gave up on {url} after {CHROME_MAX_ATTEMPTS} attempts")
    }
}

#[async_trait]
impl ScreenshotBackend for ChromeBackend {
    async fn capture(&self, url: &str, dest: &Path) -> Result<()> {
        info!(url, backend = "chrome", dest = %dest.display(), "Capturing screenshot");
        self.run_chrome(url, dest).await?;
        info!(url, backend = "chrome", "Screenshot saved");
        Ok(())
    }
}

pub struct BrowserlessBackend {
    client: BrowserlessClient,
    viewport: Viewport,
}

impl BrowserlessBackend {
    pub fn new(base_url: &str, token: Option<&str>, viewport: Viewport) -> Result<Self> {
        info!(base_url, "BrowserlessBackend initialized");
        let client =
            BrowserlessClient::new(base_url, token).context("Failed to build Browserless client")?;
        Ok(Self { client, viewport })
    }
}

#[async_trait]
impl ScreenshotBackend for BrowserlessBackend {
    async fn capture(&self, url: &str, dest: &Path) -> Result<()> {
        info!(url, backend = "browserless", dest = %dest.display(), "Capturing screenshot");

        let png = self
            .client
            .screenshot(url, self.viewport)
            .await
            .context("Browserless screenshot request failed")?;

        tokio::fs::write(dest, &png)
            .await
            .with_context(|| format!("Failed to write {}", dest.display()))?;

        info!(url, backend = "browserless", bytes = png.len(), "Screenshot saved");
        Ok(())
    }
}

async fn screenshot_written(dest: &Path) -> bool {
    matches!(tokio::fs::metadata(dest).await, Ok(meta) if meta.len() > 0)
}

fn is_transient_error(msg: &str) -> bool {
    msg.contains("Cannot fork") || msg.contains("Resource temporarily unavailable")
}

async fn retry_with_backoff(attempt: u32) {
    let backoff = CHROME_RETRY_BASE * 3u32.pow(attempt);
    let jitter = Duration::from_millis(rand::rng().random_range(0..1000));
    tokio::time::sleep(backoff + jitter).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chrome_rejects_non_http_urls() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ChromeBackend::new("chromium", 1920, 1080);
        let err = backend
            .capture("file:///etc/passwd", &dir.path().join("x.png"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Only http/https"));
    }

    #[tokio::test]
    async fn missing_chrome_binary_fails_without_retry() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.png");
        let backend = ChromeBackend::new("/nonexistent/launchwatch-chromium", 1920, 1080);

        let err = backend.capture("https://aws.amazon.com/s3", &dest).await.unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/launchwatch-chromium"));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn browserless_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.png");
        let backend =
            BrowserlessBackend::new("http://127.0.0.1:1", None, Viewport::default()).unwrap();

        assert!(backend.capture("https://aws.amazon.com/s3", &dest).await.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn transient_errors_are_recognized() {
        assert!(is_transient_error("fork: Resource temporarily unavailable"));
        assert!(!is_transient_error("No such file or directory"));
    }
}
