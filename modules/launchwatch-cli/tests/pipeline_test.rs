//! End-to-end runs with mocked page fetching and screenshots.

use launchwatch_capture::testing::MockBackend;
use launchwatch_capture::ScreenshotCapture;
use launchwatch_cli::{OutputLayout, Pipeline};
use launchwatch_common::{AnnouncementRecord, Config, EnrichedAnnouncement};
use launchwatch_research::ServiceResearchLookup;
use launchwatch_scout::testing::MockFetcher;
use launchwatch_scout::{curated, AnnouncementSource};

const BLOG: &str = "https://blog.example.com/launches";

fn config(max_services: usize, max_screenshots: usize) -> Config {
    Config {
        blog_url: BLOG.into(),
        max_services,
        max_screenshots,
        research_delay_ms: 0,
        screenshot_delay_ms: 0,
        ..Config::default()
    }
}

fn source(fetcher: MockFetcher) -> AnnouncementSource {
    AnnouncementSource::new(
        BLOG,
        "https://aws.amazon.com",
        Box::new(fetcher),
        curated::embedded().unwrap(),
    )
    .unwrap()
}

fn read_research(layout: &OutputLayout) -> Vec<EnrichedAnnouncement> {
    let text = std::fs::read_to_string(layout.research_path()).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn curated_fallback_run_writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path().join("outputs"));
    layout.create().unwrap();

    let config = config(4, 2);
    let capture = ScreenshotCapture::new(Box::new(MockBackend::new()), layout.screenshots_dir());
    let pipeline = Pipeline::new(
        &config,
        source(MockFetcher::new()),
        ServiceResearchLookup::from_config(&config).unwrap(),
        Some(capture),
        layout.clone(),
    );

    let summary = pipeline.run().await.unwrap();
    assert_eq!(summary.announcements, 10);
    assert_eq!(summary.researched, 4);
    assert_eq!(summary.placeholders, 0);
    assert_eq!(summary.screenshots, 4);

    let announcements: Vec<AnnouncementRecord> =
        serde_json::from_str(&std::fs::read_to_string(layout.announcements_path()).unwrap())
            .unwrap();
    assert_eq!(announcements, curated::embedded().unwrap());

    let research = read_research(&layout);
    assert_eq!(research.len(), 4);
    assert_eq!(research[0].service_name(), "Kiro");
    assert_eq!(research[0].research.ga_status, "Public Preview");
    assert_eq!(research[0].research.screenshots().len(), 2);
    assert_eq!(research[1].research.screenshots().len(), 2);
    assert!(!research[2].research.has_screenshots_attached());
    assert!(layout.screenshots_dir().join("kiro_main.png").exists());

    let deck = std::fs::read_to_string(layout.deck_path(&config.deck_name)).unwrap();
    let report = std::fs::read_to_string(layout.report_path()).unwrap();
    for item in &research {
        assert!(deck.contains(item.service_name()));
        assert!(report.contains(item.service_name()));
    }
    assert!(deck.contains("](../screenshots/kiro_main.png)"));
    assert!(report.contains("Total Services Researched: 4"));
}

#[tokio::test]
async fn scraped_unknown_service_gets_placeholder_research() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    layout.create().unwrap();

    let fetcher = MockFetcher::new().on_page(
        BLOG,
        "<article><h2>Amazon Quantum Ledger Widgets now available</h2></article>",
    );
    let config = config(10, 5);
    let pipeline = Pipeline::new(
        &config,
        source(fetcher),
        ServiceResearchLookup::from_config(&config).unwrap(),
        None,
        layout.clone(),
    );

    let summary = pipeline.run().await.unwrap();
    assert_eq!(summary.announcements, 1);
    assert_eq!(summary.placeholders, 1);
    assert_eq!(summary.screenshots, 0);

    let research = read_research(&layout);
    assert_eq!(research[0].service_name(), "Quantum Ledger Widgets");
    assert_eq!(research[0].research.category, "General");
    assert!(research[0].research.is_placeholder());
    assert!(!research[0].research.has_screenshots_attached());

    let report = std::fs::read_to_string(layout.report_path()).unwrap();
    assert!(!report.contains("Screenshots:"));
}

#[tokio::test]
async fn missing_output_dirs_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // Layout never created.
    let layout = OutputLayout::new(dir.path().join("absent"));

    let config = config(1, 0);
    let pipeline = Pipeline::new(
        &config,
        source(MockFetcher::new()),
        ServiceResearchLookup::from_config(&config).unwrap(),
        None,
        layout,
    );

    assert!(pipeline.run().await.is_err());
}

#[test]
fn from_config_honors_skip_screenshots() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        skip_screenshots: true,
        curated_only: true,
        ..Config::default()
    };
    assert!(Pipeline::from_config(&config, OutputLayout::new(dir.path())).is_ok());
}
