pub mod backend;
pub mod capture;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use backend::{BrowserlessBackend, ChromeBackend, ScreenshotBackend};
pub use capture::{console_url, ScreenshotCapture};
