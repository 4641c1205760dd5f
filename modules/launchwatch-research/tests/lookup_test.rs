use std::io::Write;

use launchwatch_common::{Config, ServiceResearchRecord};
use launchwatch_research::ServiceResearchLookup;

#[test]
fn default_config_uses_embedded_registry() {
    let lookup = ServiceResearchLookup::from_config(&Config::default()).unwrap();
    assert_eq!(lookup.registry().release(), "AWS re:Invent 2025");

    let record = lookup.lookup("AWS Graviton5", Some("Compute"));
    assert_eq!(record.category, "Compute");
    assert!(!record.documentation_urls.is_empty());
}

#[test]
fn registry_file_replaces_embedded_asset() {
    let mut entry = ServiceResearchRecord::placeholder("Aurora DSQL", Some("Databases"));
    entry.ga_status = "Generally Available".into();
    entry.feature_overview = "Distributed SQL".into();
    let asset = serde_json::json!({ "release": "test release", "services": [entry] });

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{asset}").unwrap();

    let config = Config {
        registry_path: Some(file.path().to_path_buf()),
        ..Config::default()
    };
    let lookup = ServiceResearchLookup::from_config(&config).unwrap();

    assert_eq!(lookup.lookup("Aurora DSQL", None).ga_status, "Generally Available");
    // Embedded entries are gone once a file is supplied.
    assert!(lookup.lookup("Kiro", None).is_placeholder());
}

#[test]
fn missing_registry_file_is_an_error() {
    let config = Config {
        registry_path: Some("/no/such/registry.json".into()),
        ..Config::default()
    };
    assert!(ServiceResearchLookup::from_config(&config).is_err());
}

#[test]
fn looked_up_record_survives_json_round_trip() {
    let lookup = ServiceResearchLookup::from_config(&Config::default()).unwrap();
    let record = lookup.lookup("Amazon Bedrock AgentCore", Some("Agentic AI"));

    let json = serde_json::to_string_pretty(&record).unwrap();
    let parsed: ServiceResearchRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}
