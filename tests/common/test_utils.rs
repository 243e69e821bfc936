use docqa::{
    analysis::Document,
    config::{Config, LogsConfig, ServiceConfig},
};
use std::path::PathBuf;
use tempfile::TempDir;

pub const TEST_QUERY: &str = "What is this about?";
pub const TEST_ANSWER: &str = "It is a test document.";

/// The document used by the round-trip scenarios
pub fn sample_document() -> Document {
    Document::new("doc.pdf", b"%PDF-1.4 test document".to_vec())
}

/// Create a test configuration pointing at the given endpoint
pub fn create_test_config(endpoint: &str) -> Config {
    Config {
        service: ServiceConfig {
            endpoint: endpoint.to_string(),
            timeout_secs: None,
        },
        logs: LogsConfig {
            level: "debug".to_string(),
        },
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a file into the temp dir and return its path
pub async fn write_test_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, content)
        .await
        .expect("Failed to write test file");
    path
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
service:
  endpoint: "http://127.0.0.1:9090/upload/"
  timeout_secs: 30
logs:
  level: "debug"
"#;
