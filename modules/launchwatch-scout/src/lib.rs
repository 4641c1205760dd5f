pub mod curated;
pub mod dedupe;
pub mod extract;
pub mod fetcher;
pub mod infer;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use dedupe::dedupe;
pub use fetcher::{BrowserlessFetcher, HttpFetcher, PageFetcher};
pub use infer::infer_service_name;
pub use source::{AnnouncementSource, SourceMode};
