//! Text renderers for the enriched announcement list: a Marp slide deck and a
//! plain-text summary report. Both are `Display` types; callers decide where the
//! text goes.

pub mod deck;
pub mod report;

pub use deck::{Deck, MAX_BULLETS, MAX_USAGE_EXAMPLES, MAX_USAGE_STEPS};
pub use report::SummaryReport;
