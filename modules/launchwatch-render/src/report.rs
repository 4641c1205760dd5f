use std::fmt;

use chrono::{DateTime, Utc};
use launchwatch_common::EnrichedAnnouncement;

const RULE_WIDTH: usize = 80;

/// Plain-text summary of a run, one section per researched service.
pub struct SummaryReport<'a> {
    release: &'a str,
    generated_at: DateTime<Utc>,
    items: &'a [EnrichedAnnouncement],
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        release: &'a str,
        generated_at: DateTime<Utc>,
        items: &'a [EnrichedAnnouncement],
    ) -> Self {
        Self {
            release,
            generated_at,
            items,
        }
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(RULE_WIDTH);
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "{banner}")?;
        writeln!(f, "{} - New Services and Features Summary", self.release)?;
        writeln!(
            f,
            "Generated on: {}",
            self.generated_at.format("%B %d, %Y at %I:%M %p UTC")
        )?;
        writeln!(f, "{banner}\n")?;
        writeln!(f, "Total Services Researched: {}\n", self.items.len())?;

        for (i, item) in self.items.iter().enumerate() {
            let r = &item.research;
            writeln!(f, "\n{}. {}", i + 1, r.service_name)?;
            writeln!(f, "{rule}")?;
            writeln!(f, "Category: {}", r.category)?;
            writeln!(f, "Status: {}", r.ga_status)?;
            writeln!(f, "Overview: {}\n", r.feature_overview)?;

            writeln!(f, "Problems Solved:")?;
            for problem in &r.problems_solved {
                writeln!(f, "  • {problem}")?;
            }
            writeln!(f, "\nBenefits:")?;
            for benefit in &r.benefits {
                writeln!(f, "  • {benefit}")?;
            }

            writeln!(f, "\nPricing: {}", r.cost_info.pricing_model)?;
            writeln!(f, "Free Tier: {}", r.cost_info.free_tier)?;
            writeln!(f, "Availability: {}", r.regional_availability)?;
            if let Some(doc) = r.documentation_urls.first() {
                writeln!(f, "Documentation: {doc}")?;
            }
            if r.has_screenshots_attached() {
                writeln!(f, "Screenshots: {} captured", r.screenshots().len())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use launchwatch_common::{AnnouncementRecord, ServiceResearchRecord, NOT_AVAILABLE};

    fn item(name: &str) -> EnrichedAnnouncement {
        EnrichedAnnouncement {
            announcement: AnnouncementRecord::extracted(
                format!("AWS launches {name}"),
                name.to_string(),
                String::new(),
                "https://aws.amazon.com/".into(),
            ),
            research: ServiceResearchRecord::placeholder(name, None),
        }
    }

    #[test]
    fn header_counts_services() {
        let at = Utc.with_ymd_and_hms(2025, 12, 5, 14, 30, 0).unwrap();
        let items = [item("Alpha"), item("Beta")];
        let text = SummaryReport::new("AWS re:Invent 2025", at, &items).to_string();

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("AWS re:Invent 2025 - New Services and Features Summary"));
        assert!(text.contains("Generated on: December 05, 2025 at 02:30 PM UTC"));
        assert!(text.contains("Total Services Researched: 2"));
        assert!(text.contains("\n1. Alpha\n"));
        assert!(text.contains("\n2. Beta\n"));
        assert!(text.contains(&format!("  • {NOT_AVAILABLE}")));
        assert!(text.contains(&format!("Pricing: {NOT_AVAILABLE}\nFree Tier: {NOT_AVAILABLE}\n")));
    }

    #[test]
    fn screenshot_count_only_when_attached() {
        let at = Utc.with_ymd_and_hms(2025, 12, 5, 0, 0, 0).unwrap();
        let mut with_shots = item("Alpha");
        with_shots
            .research
            .attach_screenshots(vec!["a_main.png".into(), "a_pricing.png".into()])
            .unwrap();
        let items = [with_shots, item("Beta")];
        let text = SummaryReport::new("r", at, &items).to_string();

        assert_eq!(text.matches("Screenshots:").count(), 1);
        assert!(text.contains("Screenshots: 2 captured"));
    }
}
