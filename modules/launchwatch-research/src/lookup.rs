use anyhow::Context;
use launchwatch_common::{Config, Result, ServiceResearchRecord};
use tracing::{debug, info};

use crate::registry::Registry;

/// Resolves a service name to its research record. Never fails: names the registry
/// doesn't know get a placeholder filled with sentinel values.
#[derive(Debug, Clone)]
pub struct ServiceResearchLookup {
    registry: Registry,
}

impl ServiceResearchLookup {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Embedded registry, or the file at `config.registry_path` when set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = match config.registry_path.as_deref() {
            Some(path) => Registry::from_file(path)
                .with_context(|| format!("Failed to load research registry {}", path.display()))?,
            None => Registry::embedded()?,
        };
        Ok(Self::new(registry))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Exact, case-sensitive match on `service_name`.
    pub fn lookup(&self, service_name: &str, category: Option<&str>) -> ServiceResearchRecord {
        match self.registry.get(service_name) {
            Some(record) => {
                debug!(service = service_name, "Research registry hit");
                record.clone()
            }
            None => {
                info!(
                    service = service_name,
                    release = self.registry.release(),
                    "No research entry, using placeholder"
                );
                ServiceResearchRecord::placeholder(service_name, category)
            }
        }
    }
}
