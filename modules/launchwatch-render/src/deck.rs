use std::fmt;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use launchwatch_common::{EnrichedAnnouncement, ServiceResearchRecord};

/// Bullets shown per list on a slide; longer lists are cut.
pub const MAX_BULLETS: usize = 6;
/// Usage examples shown per service.
pub const MAX_USAGE_EXAMPLES: usize = 2;
/// Steps shown per usage example.
pub const MAX_USAGE_STEPS: usize = 5;

/// Text slides rendered for every service, before its screenshots.
const SLIDES_PER_SERVICE: usize = 7;

const FRONT_MATTER: &str = "---\nmarp: true\ntheme: default\npaginate: true\n---\n";
const SLIDE_BREAK: &str = "\n---\n";

/// Marp Markdown deck for a run.
///
/// Screenshot paths are rewritten relative to `deck_dir` so the deck renders in place.
pub struct Deck<'a> {
    release: &'a str,
    generated_at: DateTime<Utc>,
    deck_dir: &'a Path,
    items: &'a [EnrichedAnnouncement],
}

impl<'a> Deck<'a> {
    pub fn new(
        release: &'a str,
        generated_at: DateTime<Utc>,
        deck_dir: &'a Path,
        items: &'a [EnrichedAnnouncement],
    ) -> Self {
        Self {
            release,
            generated_at,
            deck_dir,
            items,
        }
    }

    /// Number of slides the deck renders to.
    pub fn slide_count(&self) -> usize {
        2 + self
            .items
            .iter()
            .map(|item| SLIDES_PER_SERVICE + item.research.screenshots().len())
            .sum::<usize>()
    }

    fn service_slides(&self, f: &mut fmt::Formatter<'_>, r: &ServiceResearchRecord) -> fmt::Result {
        let name = &r.service_name;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}\n")?;
        writeln!(f, "**Category:** {}  ", r.category)?;
        writeln!(f, "**Status:** {}\n", r.ga_status)?;
        writeln!(f, "## Overview\n\n{}\n", r.feature_overview)?;
        writeln!(f, "## Background\n\n{}", r.background)?;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}: Capabilities\n")?;
        bullets(f, &r.capabilities_enabled)?;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}: Problems & Prior Limitations\n")?;
        writeln!(f, "## Problems Solved\n")?;
        bullets(f, &r.problems_solved)?;
        writeln!(f, "\n## Prior Limitations\n")?;
        bullets(f, &r.prior_limitations)?;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}: Benefits\n")?;
        bullets(f, &r.benefits)?;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}: Pricing\n")?;
        writeln!(f, "**Pricing Model:** {}  ", r.cost_info.pricing_model)?;
        writeln!(f, "**Free Tier:** {}  ", r.cost_info.free_tier)?;
        writeln!(f, "**Estimated Cost:** {}", r.cost_info.estimated_cost)?;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}: Usage Examples")?;
        for example in r.usage_examples.iter().take(MAX_USAGE_EXAMPLES) {
            writeln!(f, "\n## {}\n", example.title)?;
            writeln!(f, "{}\n", example.description)?;
            for (i, step) in example.steps.iter().take(MAX_USAGE_STEPS).enumerate() {
                writeln!(f, "{}. {step}", i + 1)?;
            }
        }

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# {name}: Availability & Documentation\n")?;
        writeln!(f, "**Status:** {}  ", r.ga_status)?;
        writeln!(f, "**Regions:** {}  ", r.regional_availability)?;
        writeln!(f, "**Localization:** {}\n", r.localization)?;
        writeln!(f, "## Documentation\n")?;
        bullets(f, &r.documentation_urls)?;
        writeln!(f, "\n## Announcements\n")?;
        bullets(f, &r.announcement_urls)?;

        for shot in r.screenshots() {
            f.write_str(SLIDE_BREAK)?;
            writeln!(f, "\n# {name}: Console View\n")?;
            writeln!(
                f,
                "![w:900]({})",
                markdown_path(&relative_to(shot, self.deck_dir))
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Deck<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FRONT_MATTER)?;
        writeln!(f, "\n# {}\n", self.release)?;
        writeln!(f, "## New Services and Features\n")?;
        writeln!(f, "Generated on {}", self.generated_at.format("%B %d, %Y"))?;

        f.write_str(SLIDE_BREAK)?;
        writeln!(f, "\n# Services Covered\n")?;
        for (i, item) in self.items.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, item.service_name())?;
        }

        for item in self.items {
            self.service_slides(f, &item.research)?;
        }
        Ok(())
    }
}

fn bullets(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    for item in items.iter().take(MAX_BULLETS) {
        writeln!(f, "- {item}")?;
    }
    Ok(())
}

/// `target` relative to `base`. Paths of mixed kind (one absolute, one not) are
/// returned unchanged.
fn relative_to(target: &Path, base: &Path) -> PathBuf {
    if target.is_absolute() != base.is_absolute() {
        return target.to_path_buf();
    }

    let target: Vec<Component> = target.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();
    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for c in &target[common..] {
        rel.push(c.as_os_str());
    }
    rel
}

fn markdown_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
