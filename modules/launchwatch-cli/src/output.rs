use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Directory layout of a run under the configured output root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root and its `data/`, `screenshots/`, `presentations/` children.
    pub fn create(&self) -> Result<()> {
        for dir in [
            self.root.clone(),
            self.data_dir(),
            self.screenshots_dir(),
            self.presentations_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.root.join("screenshots")
    }

    pub fn presentations_dir(&self) -> PathBuf {
        self.root.join("presentations")
    }

    pub fn announcements_path(&self) -> PathBuf {
        self.data_dir().join("announcements.json")
    }

    pub fn research_path(&self) -> PathBuf {
        self.data_dir().join("research_results.json")
    }

    pub fn report_path(&self) -> PathBuf {
        self.data_dir().join("summary_report.txt")
    }

    pub fn deck_path(&self, deck_name: &str) -> PathBuf {
        self.presentations_dir().join(format!("{deck_name}.md"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("automation.log")
    }
}

/// Write `value` as pretty-printed JSON, replacing any existing file.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    write_text(path, &json).await
}

pub async fn write_text(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths() {
        let layout = OutputLayout::new("outputs");
        assert_eq!(layout.announcements_path(), PathBuf::from("outputs/data/announcements.json"));
        assert_eq!(layout.research_path(), PathBuf::from("outputs/data/research_results.json"));
        assert_eq!(layout.report_path(), PathBuf::from("outputs/data/summary_report.txt"));
        assert_eq!(
            layout.deck_path("AWS_reInvent_2025_Services"),
            PathBuf::from("outputs/presentations/AWS_reInvent_2025_Services.md")
        );
        assert_eq!(layout.log_path(), PathBuf::from("outputs/automation.log"));
    }

    #[tokio::test]
    async fn create_then_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().join("run"));
        layout.create().unwrap();
        assert!(layout.screenshots_dir().is_dir());
        assert!(layout.presentations_dir().is_dir());

        write_json(&layout.announcements_path(), &vec!["a", "b"]).await.unwrap();
        let text = std::fs::read_to_string(layout.announcements_path()).unwrap();
        assert_eq!(text, "[\n  \"a\",\n  \"b\"\n]");
    }

    #[tokio::test]
    async fn write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/data.json");
        assert!(write_text(&path, "x").await.is_err());
    }
}
