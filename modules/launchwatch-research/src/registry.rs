// Research registry: static enrichment records for one release, keyed by service name.

use std::collections::HashMap;
use std::path::Path;

use launchwatch_common::{LaunchwatchError, Result, ServiceResearchRecord};
use serde::Deserialize;
use tracing::{info, warn};

const EMBEDDED_REGISTRY: &str = include_str!("../data/research_registry.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryAsset {
    release: String,
    services: Vec<ServiceResearchRecord>,
}

#[derive(Debug, Clone)]
pub struct Registry {
    release: String,
    services: HashMap<String, ServiceResearchRecord>,
}

impl Registry {
    /// The registry shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse("embedded research registry", EMBEDDED_REGISTRY)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Parse a registry asset. On duplicate service names the first entry wins.
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let asset: RegistryAsset =
            serde_json::from_str(content).map_err(|source| LaunchwatchError::DataAsset {
                name: name.to_string(),
                source,
            })?;

        let mut services = HashMap::with_capacity(asset.services.len());
        for record in asset.services {
            if services.contains_key(&record.service_name) {
                warn!(
                    asset = name,
                    service = record.service_name.as_str(),
                    "Duplicate registry entry ignored"
                );
                continue;
            }
            services.insert(record.service_name.clone(), record);
        }

        info!(
            asset = name,
            release = asset.release.as_str(),
            count = services.len(),
            "Loaded research registry"
        );
        Ok(Self {
            release: asset.release,
            services,
        })
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn get(&self, service_name: &str) -> Option<&ServiceResearchRecord> {
        self.services.get(service_name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_registry_parses() {
        let registry = Registry::embedded().unwrap();
        assert_eq!(registry.release(), "AWS re:Invent 2025");
        assert_eq!(registry.len(), 10);
        assert!(registry.get("Kiro").is_some());
        assert!(registry.get("kiro").is_none());
    }

    #[test]
    fn registry_covers_every_curated_service() {
        let registry = Registry::embedded().unwrap();
        for name in [
            "Kiro",
            "AWS Security Agent",
            "AWS DevOps Agent",
            "Amazon Nova 2",
            "Amazon Nova Forge",
            "Amazon Bedrock AgentCore",
            "AWS Trainium3 UltraServers",
            "AWS Graviton5",
            "Amazon S3 Vectors",
            "AWS Lambda Durable Functions",
        ] {
            let record = registry.get(name).unwrap();
            assert!(!record.is_placeholder(), "{name} should be curated");
            assert!(!record.has_screenshots_attached());
            assert_ne!(record.cost_info.pricing_model, launchwatch_common::NOT_AVAILABLE);
            assert!(!record.usage_examples.is_empty(), "{name} needs a usage example");
        }
    }

    #[test]
    fn first_duplicate_wins() {
        let record = |status: &str| {
            let mut r = ServiceResearchRecord::placeholder("Dup", Some("Compute"));
            r.ga_status = status.to_string();
            r
        };
        let json = serde_json::json!({
            "release": "test",
            "services": [record("first"), record("second")],
        })
        .to_string();

        let registry = Registry::parse("inline", &json).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Dup").unwrap().ga_status, "first");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let json = r#"{ "release": "x", "services": [], "extra": 1 }"#;
        let err = Registry::parse("bad.json", json).unwrap_err();
        assert!(matches!(err, LaunchwatchError::DataAsset { ref name, .. } if name == "bad.json"));
    }
}
