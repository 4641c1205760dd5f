// The five-step run: announcements → research → screenshots → deck → report.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use launchwatch_capture::ScreenshotCapture;
use launchwatch_common::{Config, EnrichedAnnouncement};
use launchwatch_render::{Deck, SummaryReport};
use launchwatch_research::ServiceResearchLookup;
use launchwatch_scout::AnnouncementSource;
use tracing::info;

use crate::output::{write_json, write_text, OutputLayout};

/// Counts and artifact paths from a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub announcements: usize,
    pub researched: usize,
    pub placeholders: usize,
    pub screenshots: usize,
    pub announcements_path: PathBuf,
    pub research_path: PathBuf,
    pub deck_path: PathBuf,
    pub report_path: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Launchwatch Run Complete ===")?;
        writeln!(f, "Announcements:       {}", self.announcements)?;
        writeln!(f, "Services researched: {}", self.researched)?;
        writeln!(f, "  without research:  {}", self.placeholders)?;
        writeln!(f, "Screenshots:         {}", self.screenshots)?;
        writeln!(f, "\nOutput files:")?;
        writeln!(f, "  Announcements: {}", self.announcements_path.display())?;
        writeln!(f, "  Research:      {}", self.research_path.display())?;
        writeln!(f, "  Presentation:  {}", self.deck_path.display())?;
        writeln!(f, "  Summary:       {}", self.report_path.display())?;
        Ok(())
    }
}

pub struct Pipeline {
    source: AnnouncementSource,
    lookup: ServiceResearchLookup,
    /// `None` skips the screenshot step.
    capture: Option<ScreenshotCapture>,
    layout: OutputLayout,
    max_services: usize,
    max_screenshots: usize,
    research_delay: Duration,
    screenshot_delay: Duration,
    deck_name: String,
}

impl Pipeline {
    pub fn new(
        config: &Config,
        source: AnnouncementSource,
        lookup: ServiceResearchLookup,
        capture: Option<ScreenshotCapture>,
        layout: OutputLayout,
    ) -> Self {
        Self {
            source,
            lookup,
            capture,
            layout,
            max_services: config.max_services,
            max_screenshots: config.max_screenshots,
            research_delay: config.research_delay(),
            screenshot_delay: config.screenshot_delay(),
            deck_name: config.deck_name.clone(),
        }
    }

    /// Wire every collaborator from `config`. The output layout must already exist.
    pub fn from_config(config: &Config, layout: OutputLayout) -> Result<Self> {
        let source = AnnouncementSource::from_config(config)?;
        let lookup = ServiceResearchLookup::from_config(config)?;
        let capture = if config.skip_screenshots {
            None
        } else {
            Some(ScreenshotCapture::from_config(config, layout.screenshots_dir())?)
        };
        Ok(Self::new(config, source, lookup, capture, layout))
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary {
            announcements_path: self.layout.announcements_path(),
            research_path: self.layout.research_path(),
            deck_path: self.layout.deck_path(&self.deck_name),
            report_path: self.layout.report_path(),
            ..RunSummary::default()
        };

        info!("[Step 1/5] Collecting announcements");
        let announcements = self.source.fetch().await;
        write_json(&summary.announcements_path, &announcements).await?;
        summary.announcements = announcements.len();
        info!(
            count = announcements.len(),
            path = %summary.announcements_path.display(),
            "Saved announcements"
        );

        let total = announcements.len().min(self.max_services);
        info!(total, "[Step 2/5] Researching services");
        let mut enriched: Vec<EnrichedAnnouncement> = Vec::with_capacity(total);
        for (i, announcement) in announcements.into_iter().take(total).enumerate() {
            if i > 0 {
                tokio::time::sleep(self.research_delay).await;
            }
            info!(
                n = i + 1,
                total,
                service = announcement.service_name.as_str(),
                "Researching"
            );
            let research = self
                .lookup
                .lookup(&announcement.service_name, announcement.category.as_deref());
            if research.is_placeholder() {
                summary.placeholders += 1;
            }
            enriched.push(EnrichedAnnouncement {
                announcement,
                research,
            });
        }
        write_json(&summary.research_path, &enriched).await?;
        summary.researched = enriched.len();
        info!(count = enriched.len(), path = %summary.research_path.display(), "Saved research results");

        match &self.capture {
            Some(capture) => {
                summary.screenshots = self.capture_screenshots(capture, &mut enriched).await?;
                write_json(&summary.research_path, &enriched).await?;
            }
            None => info!("[Step 3/5] Screenshots skipped"),
        }

        info!("[Step 4/5] Rendering presentation");
        let generated_at = Utc::now();
        let release = self.lookup.registry().release();
        let deck_dir = self.layout.presentations_dir();
        let deck = Deck::new(release, generated_at, &deck_dir, &enriched);
        write_text(&summary.deck_path, &deck.to_string()).await?;
        info!(slides = deck.slide_count(), path = %summary.deck_path.display(), "Presentation saved");

        info!("[Step 5/5] Writing summary report");
        let report = SummaryReport::new(release, generated_at, &enriched);
        write_text(&summary.report_path, &report.to_string()).await?;
        info!(path = %summary.report_path.display(), "Summary report saved");

        Ok(summary)
    }

    async fn capture_screenshots(
        &self,
        capture: &ScreenshotCapture,
        enriched: &mut [EnrichedAnnouncement],
    ) -> Result<usize> {
        let total = enriched.len().min(self.max_screenshots);
        info!(total, "[Step 3/5] Capturing screenshots");

        let mut captured = 0;
        for (i, item) in enriched.iter_mut().take(total).enumerate() {
            if i > 0 {
                tokio::time::sleep(self.screenshot_delay).await;
            }
            let service = item.service_name().to_string();
            info!(n = i + 1, total, service = service.as_str(), "Capturing");

            let paths = capture.capture_service(&service).await;
            captured += paths.len();
            item.research
                .attach_screenshots(paths)
                .with_context(|| format!("Cannot record screenshots for {service}"))?;
        }
        Ok(captured)
    }
}
