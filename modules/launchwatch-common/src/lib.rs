pub mod config;
pub mod error;
pub mod types;

pub use config::{BrowserConfig, Config};
pub use error::{LaunchwatchError, Result};
pub use types::*;
