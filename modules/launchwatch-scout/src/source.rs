use anyhow::Context;
use launchwatch_common::{AnnouncementRecord, Config, LaunchwatchError, Result};
use tracing::{info, warn};
use url::Url;

use crate::curated;
use crate::extract::extract_announcements;
use crate::fetcher::{BrowserlessFetcher, HttpFetcher, PageFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// Scrape the blog, falling back to the curated list on failure or no results.
    Heuristic,
    /// Always return the curated list.
    CuratedOnly,
}

/// Produces the run's announcement list. `fetch` never fails.
pub struct AnnouncementSource {
    blog_url: String,
    link_base: Url,
    fetcher: Box<dyn PageFetcher>,
    curated: Vec<AnnouncementRecord>,
    mode: SourceMode,
}

impl AnnouncementSource {
    pub fn new(
        blog_url: &str,
        link_base: &str,
        fetcher: Box<dyn PageFetcher>,
        curated: Vec<AnnouncementRecord>,
    ) -> Result<Self> {
        let link_base = Url::parse(link_base)
            .map_err(|e| LaunchwatchError::Config(format!("invalid link base {link_base}: {e}")))?;
        Ok(Self {
            blog_url: blog_url.to_string(),
            link_base,
            fetcher,
            curated,
            mode: SourceMode::Heuristic,
        })
    }

    /// Build the source described by `config`: HTTP or Browserless fetcher, embedded
    /// or file-backed curated list.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher: Box<dyn PageFetcher> = match (
            config.browser.render_blog,
            config.browser.browserless_url.as_deref(),
        ) {
            (true, Some(base_url)) => Box::new(BrowserlessFetcher::new(
                base_url,
                config.browser.browserless_token.as_deref(),
            )?),
            (true, None) => {
                warn!("render_blog is set but no Browserless URL configured, using plain HTTP");
                Box::new(HttpFetcher::new(&config.user_agent, config.request_timeout())?)
            }
            (false, _) => Box::new(HttpFetcher::new(&config.user_agent, config.request_timeout())?),
        };

        let curated = match config.curated_path.as_deref() {
            Some(path) => curated::from_file(path)
                .with_context(|| format!("Failed to load curated list {}", path.display()))?,
            None => curated::embedded()?,
        };

        let mode = if config.curated_only {
            SourceMode::CuratedOnly
        } else {
            SourceMode::Heuristic
        };

        Ok(Self::new(&config.blog_url, &config.link_base, fetcher, curated)?.with_mode(mode))
    }

    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn curated(&self) -> &[AnnouncementRecord] {
        &self.curated
    }

    /// Announcements for this run: scraped when possible, curated otherwise.
    pub async fn fetch(&self) -> Vec<AnnouncementRecord> {
        if self.mode == SourceMode::CuratedOnly {
            info!(count = self.curated.len(), "Curated-only mode, skipping blog scrape");
            return self.curated.clone();
        }

        match self.scrape().await {
            Ok(announcements) if !announcements.is_empty() => {
                info!(
                    url = self.blog_url.as_str(),
                    count = announcements.len(),
                    "Extracted unique announcements"
                );
                announcements
            }
            Ok(_) => {
                warn!(
                    url = self.blog_url.as_str(),
                    "No announcements found on page, using curated list"
                );
                self.curated.clone()
            }
            Err(e) => {
                warn!(
                    url = self.blog_url.as_str(),
                    error = %format!("{e:#}"),
                    "Blog scrape failed, using curated list"
                );
                self.curated.clone()
            }
        }
    }

    async fn scrape(&self) -> anyhow::Result<Vec<AnnouncementRecord>> {
        let html = self.fetcher.fetch_html(&self.blog_url).await?;
        Ok(extract_announcements(&html, &self.link_base))
    }
}
