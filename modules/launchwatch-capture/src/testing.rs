// Test mock for the screenshot backend boundary.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::backend::ScreenshotBackend;

/// Minimal PNG signature written for every successful capture.
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Writes [`FAKE_PNG`] for every URL except those registered with `fail_on`.
/// Records each requested URL in order.
#[derive(Default)]
pub struct MockBackend {
    failures: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, url: &str) -> Self {
        self.failures.insert(url.to_string());
        self
    }

    /// Shared call log, readable after the mock is boxed.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ScreenshotBackend for MockBackend {
    async fn capture(&self, url: &str, dest: &Path) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        if self.failures.contains(url) {
            anyhow::bail!("MockBackend: capture failed for {url}");
        }
        tokio::fs::write(dest, FAKE_PNG)
            .await
            .with_context(|| format!("MockBackend: cannot write {}", dest.display()))
    }
}
