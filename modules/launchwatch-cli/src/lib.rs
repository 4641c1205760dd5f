pub mod cli;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use cli::Cli;
pub use output::OutputLayout;
pub use pipeline::{Pipeline, RunSummary};
