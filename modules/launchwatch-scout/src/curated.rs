// Curated announcement list used when the blog can't be scraped.
// The list is reference data, swapped per release, embedded at compile time and
// replaceable with a file of the same shape.

use std::path::Path;

use chrono::{DateTime, Utc};
use launchwatch_common::{AnnouncementRecord, LaunchwatchError, Result};
use serde::Deserialize;
use tracing::info;

use crate::dedupe::dedupe;
use crate::infer::infer_service_name;

const EMBEDDED_CURATED: &str = include_str!("../data/curated_announcements.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CuratedAsset {
    release: String,
    curated_at: DateTime<Utc>,
    announcements: Vec<CuratedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CuratedEntry {
    title: String,
    #[serde(default)]
    service_name: String,
    #[serde(default)]
    description: String,
    link: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    extracted_at: Option<DateTime<Utc>>,
}

/// The curated list shipped with the binary.
pub fn embedded() -> Result<Vec<AnnouncementRecord>> {
    parse("embedded curated announcements", EMBEDDED_CURATED)
}

/// Load a curated list from disk, same JSON shape as the embedded asset.
pub fn from_file(path: &Path) -> Result<Vec<AnnouncementRecord>> {
    let content = std::fs::read_to_string(path)?;
    parse(&path.display().to_string(), &content)
}

/// Parse a curated asset. Entries without a service name get one inferred from
/// the title; entries without a timestamp take the asset's `curated_at`.
pub fn parse(name: &str, content: &str) -> Result<Vec<AnnouncementRecord>> {
    let asset: CuratedAsset =
        serde_json::from_str(content).map_err(|source| LaunchwatchError::DataAsset {
            name: name.to_string(),
            source,
        })?;

    let records: Vec<AnnouncementRecord> = asset
        .announcements
        .into_iter()
        .map(|entry| {
            let title = entry.title.trim().to_string();
            let service_name = if entry.service_name.trim().is_empty() {
                infer_service_name(&title)
            } else {
                entry.service_name
            };
            AnnouncementRecord {
                title,
                service_name,
                description: entry.description,
                link: entry.link,
                category: entry.category,
                extracted_at: entry.extracted_at.unwrap_or(asset.curated_at),
            }
        })
        .collect();

    let records = dedupe(records);
    info!(
        asset = name,
        release = asset.release.as_str(),
        count = records.len(),
        "Loaded curated announcements"
    );
    Ok(records)
}
