pub mod error;

pub use error::{BrowserlessError, Result};

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

/// Browser viewport used for screenshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Serialize)]
struct ScreenshotOptions {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "fullPage")]
    full_page: bool,
}

#[derive(Serialize)]
struct ScreenshotBody<'a> {
    url: &'a str,
    options: ScreenshotOptions,
    viewport: Viewport,
}

pub struct BrowserlessClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let mut endpoint = format!("{}/{path}", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    /// POST a JSON body to `path`, mapping non-2xx responses to [`BrowserlessError::Status`].
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let resp = self.client.post(self.endpoint(path)).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BrowserlessError::Status {
                endpoint: path,
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(resp)
    }

    /// Fully rendered HTML for `url`, via /content.
    pub async fn content(&self, url: &str) -> Result<String> {
        let resp = self.post("content", &serde_json::json!({ "url": url })).await?;
        Ok(resp.text().await?)
    }

    /// PNG of `url` at `viewport`, via /screenshot.
    pub async fn screenshot(&self, url: &str, viewport: Viewport) -> Result<Vec<u8>> {
        debug!(url, width = viewport.width, height = viewport.height, "Requesting screenshot");

        let body = ScreenshotBody {
            url,
            options: ScreenshotOptions {
                kind: "png",
                full_page: false,
            },
            viewport,
        };
        let bytes = self.post("screenshot", &body).await?.bytes().await?;
        if bytes.is_empty() {
            return Err(BrowserlessError::EmptyScreenshot {
                url: url.to_string(),
            });
        }
        Ok(bytes.to_vec())
    }
}
