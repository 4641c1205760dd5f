use std::collections::HashSet;

use launchwatch_common::AnnouncementRecord;

/// Drop announcements whose title was already seen. First occurrence wins and
/// input order is preserved. Titles compare exactly: no trimming, no case folding.
pub fn dedupe(records: Vec<AnnouncementRecord>) -> Vec<AnnouncementRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.title.clone()))
        .collect()
}
