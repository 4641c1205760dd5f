use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserlessError>;

#[derive(Debug, Error)]
pub enum BrowserlessError {
    #[error("Browserless request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Browserless /{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Browserless returned an empty screenshot for {url}")]
    EmptyScreenshot { url: String },
}
