//! AnnouncementSource tests: scrape → fallback behavior end to end.
//!
//! MockFetcher stands in for the network except where a real HttpFetcher is
//! pointed at a closed local port.

use std::io::Write;
use std::time::Duration;

use launchwatch_common::Config;
use launchwatch_scout::curated;
use launchwatch_scout::testing::MockFetcher;
use launchwatch_scout::{AnnouncementSource, HttpFetcher, SourceMode};

const BLOG: &str = "https://www.aboutamazon.com/aws-reinvent-news-updates";

const BLOG_HTML: &str = r#"
<html><body>
  <div class="news-grid">
    <div class="news-item">
      <a href="/about-aws/whats-new/2025/12/kiro-autonomous-agent/">AWS previews the Kiro autonomous agent</a>
      <p class="news-item__desc">A frontier agent for software delivery.</p>
    </div>
    <div class="news-item">
      <a href="https://aws.amazon.com/s3/features/vectors/">Amazon S3 Vectors is now generally available</a>
    </div>
    <div class="news-item">
      <a href="/careers/">Careers</a>
    </div>
  </div>
</body></html>
"#;

fn source(fetcher: MockFetcher) -> AnnouncementSource {
    AnnouncementSource::new(
        BLOG,
        "https://aws.amazon.com",
        Box::new(fetcher),
        curated::embedded().unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn realistic_blog_page_is_scraped() {
    let out = source(MockFetcher::new().on_page(BLOG, BLOG_HTML)).fetch().await;

    let titles: Vec<&str> = out.iter().map(|a| a.title.as_str()).collect();
    // The grid container and its first card share a title; dedup keeps one.
    assert_eq!(
        titles,
        vec![
            "AWS previews the Kiro autonomous agent",
            "Amazon S3 Vectors is now generally available",
        ]
    );
    assert_eq!(
        out[0].link,
        "https://aws.amazon.com/about-aws/whats-new/2025/12/kiro-autonomous-agent/"
    );
    assert_eq!(out[0].description, "A frontier agent for software delivery.");
    assert_eq!(out[1].service_name, "S3 Vectors");
    assert!(out.iter().all(|a| a.category.is_none()));
}

#[tokio::test]
async fn page_without_announcements_falls_back() {
    let fetcher = MockFetcher::new().on_page(BLOG, "<html><body><p>Maintenance</p></body></html>");
    let out = source(fetcher).fetch().await;
    assert_eq!(out, curated::embedded().unwrap());
}

#[tokio::test]
async fn error_status_falls_back() {
    let fetcher = MockFetcher::new().on_error(BLOG, "HTTP 503 Service Unavailable");
    let calls = fetcher.call_counter();
    let out = source(fetcher).fetch().await;

    assert_eq!(out, curated::embedded().unwrap());
    // no retry
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    let fetcher = HttpFetcher::new("launchwatch-test", Duration::from_secs(2)).unwrap();
    let src = AnnouncementSource::new(
        "http://127.0.0.1:1/news",
        "https://aws.amazon.com",
        Box::new(fetcher),
        curated::embedded().unwrap(),
    )
    .unwrap();

    assert_eq!(src.fetch().await, curated::embedded().unwrap());
}

#[tokio::test]
async fn config_selects_curated_only_and_file_asset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "release": "test release",
            "curated_at": "2025-12-02T00:00:00Z",
            "announcements": [
                {{ "title": "Amazon Aurora DSQL adds new regions", "link": "https://aws.amazon.com/rds/aurora/dsql/" }}
            ]
        }}"#
    )
    .unwrap();

    let config = Config {
        curated_only: true,
        curated_path: Some(file.path().to_path_buf()),
        blog_url: "http://127.0.0.1:1/never-fetched".into(),
        ..Config::default()
    };
    let src = AnnouncementSource::from_config(&config).unwrap();
    assert_eq!(src.mode(), SourceMode::CuratedOnly);

    let out = src.fetch().await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].service_name, "Aurora DSQL");
}

#[test]
fn missing_curated_file_is_a_config_error() {
    let config = Config {
        curated_path: Some("/no/such/curated.json".into()),
        ..Config::default()
    };
    assert!(AnnouncementSource::from_config(&config).is_err());
}
