// Page fetchers behind one trait so the source can be tested without a network.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and return its HTML. Non-success statuses are errors.
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET with a browser-like user agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        info!(url, fetcher = "http", "Fetching page");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;

        let html = resp.text().await.context("Failed to read response body")?;
        info!(url, fetcher = "http", bytes = html.len(), "Fetched successfully");
        Ok(html)
    }
}

/// Fetches through Browserless /content so client-rendered posts are present in the HTML.
pub struct BrowserlessFetcher {
    client: browserless_client::BrowserlessClient,
}

impl BrowserlessFetcher {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        info!(base_url, "BrowserlessFetcher initialized");
        let client = browserless_client::BrowserlessClient::new(base_url, token)
            .context("Failed to build Browserless client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for BrowserlessFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        info!(url, fetcher = "browserless", "Fetching page");

        let html = self
            .client
            .content(url)
            .await
            .context("Browserless content request failed")?;

        info!(url, fetcher = "browserless", bytes = html.len(), "Fetched successfully");
        Ok(html)
    }
}
