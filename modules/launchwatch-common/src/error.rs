use thiserror::Error;

pub type Result<T> = std::result::Result<T, LaunchwatchError>;

#[derive(Error, Debug)]
pub enum LaunchwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data asset {name}: {source}")]
    DataAsset {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Screenshots already attached for {0}")]
    ScreenshotsAlreadyAttached(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
