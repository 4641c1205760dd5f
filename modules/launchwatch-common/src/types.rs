use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LaunchwatchError, Result};

/// Category used when an announcement carries none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Sentinel for descriptive fields with no curated content.
pub const NOT_AVAILABLE: &str = "Information not available";
/// Sentinel for documentation links with no curated content.
pub const DOCS_NOT_YET_AVAILABLE: &str = "Documentation not yet available";
/// Sentinel for announcement links with no curated content.
pub const ANNOUNCEMENT_NOT_YET_AVAILABLE: &str = "Announcement not yet available";

// --- Announcements ---

/// A single launch entry, either scraped from the blog or taken from the curated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub title: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub extracted_at: DateTime<Utc>,
}

impl AnnouncementRecord {
    /// Build a freshly extracted record stamped with the current time.
    pub fn extracted(title: String, service_name: String, description: String, link: String) -> Self {
        Self {
            title,
            service_name,
            description,
            link,
            category: None,
            extracted_at: Utc::now(),
        }
    }

    /// Category label, falling back to [`DEFAULT_CATEGORY`].
    pub fn effective_category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

// --- Research ---

/// Pricing summary shown on the pricing slide and in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostInfo {
    pub pricing_model: String,
    pub free_tier: String,
    pub estimated_cost: String,
}

impl CostInfo {
    fn not_available() -> Self {
        Self {
            pricing_model: NOT_AVAILABLE.to_string(),
            free_tier: NOT_AVAILABLE.to_string(),
            estimated_cost: NOT_AVAILABLE.to_string(),
        }
    }
}

/// A short walkthrough: a title, one line of context, and ordered steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsageExample {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
}

/// Static enrichment attached to an announcement's service name.
///
/// Every field is always populated; unknown services get sentinel values via
/// [`ServiceResearchRecord::placeholder`] so renderers never branch on absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceResearchRecord {
    pub service_name: String,
    pub category: String,
    pub ga_status: String,
    pub regional_availability: String,
    pub localization: String,
    pub feature_overview: String,
    pub background: String,
    pub capabilities_enabled: Vec<String>,
    pub problems_solved: Vec<String>,
    pub prior_limitations: Vec<String>,
    pub benefits: Vec<String>,
    pub documentation_urls: Vec<String>,
    pub announcement_urls: Vec<String>,
    pub cost_info: CostInfo,
    pub usage_examples: Vec<UsageExample>,
    /// Written once by the screenshot step, if it runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screenshots: Option<Vec<PathBuf>>,
}

impl ServiceResearchRecord {
    pub fn placeholder(service_name: &str, category: Option<&str>) -> Self {
        let sentinel = || vec![NOT_AVAILABLE.to_string()];
        Self {
            service_name: service_name.to_string(),
            category: category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            ga_status: NOT_AVAILABLE.to_string(),
            regional_availability: NOT_AVAILABLE.to_string(),
            localization: NOT_AVAILABLE.to_string(),
            feature_overview: NOT_AVAILABLE.to_string(),
            background: NOT_AVAILABLE.to_string(),
            capabilities_enabled: sentinel(),
            problems_solved: sentinel(),
            prior_limitations: sentinel(),
            benefits: sentinel(),
            documentation_urls: vec![DOCS_NOT_YET_AVAILABLE.to_string()],
            announcement_urls: vec![ANNOUNCEMENT_NOT_YET_AVAILABLE.to_string()],
            cost_info: CostInfo::not_available(),
            usage_examples: vec![UsageExample {
                title: NOT_AVAILABLE.to_string(),
                description: NOT_AVAILABLE.to_string(),
                steps: sentinel(),
            }],
            screenshots: None,
        }
    }

    /// True when this record was synthesized for an unknown service.
    pub fn is_placeholder(&self) -> bool {
        self.ga_status == NOT_AVAILABLE && self.feature_overview == NOT_AVAILABLE
    }

    /// Attach captured screenshot paths. Allowed exactly once per record.
    pub fn attach_screenshots(&mut self, paths: Vec<PathBuf>) -> Result<()> {
        if self.screenshots.is_some() {
            return Err(LaunchwatchError::ScreenshotsAlreadyAttached(
                self.service_name.clone(),
            ));
        }
        self.screenshots = Some(paths);
        Ok(())
    }

    pub fn screenshots(&self) -> &[PathBuf] {
        self.screenshots.as_deref().unwrap_or_default()
    }

    pub fn has_screenshots_attached(&self) -> bool {
        self.screenshots.is_some()
    }
}

/// One announcement paired with its research, the unit persisted and rendered downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedAnnouncement {
    pub announcement: AnnouncementRecord,
    pub research: ServiceResearchRecord,
}

impl EnrichedAnnouncement {
    pub fn service_name(&self) -> &str {
        &self.research.service_name
    }
}
