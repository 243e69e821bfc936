mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, info};

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const ENDPOINT_VAR: &str = "DOCQA_ENDPOINT";

pub async fn load() -> Result<Config> {
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "docqa.yaml".to_string());
    let mut config = load_from(&config_path).await?;

    if let Ok(endpoint) = env::var(ENDPOINT_VAR) {
        debug!("Endpoint overridden by {}: {}", ENDPOINT_VAR, endpoint);
        config.service.endpoint = endpoint;
    }

    validate(&config)?;
    Ok(config)
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No configuration file at {}, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn validate(config: &Config) -> Result<()> {
    let endpoint = reqwest::Url::parse(&config.service.endpoint).map_err(|e| {
        Error::config(format!(
            "Invalid service endpoint '{}': {}",
            config.service.endpoint, e
        ))
    })?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Service endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.service.timeout_secs == Some(0) {
        return Err(Error::config("service.timeout_secs must be greater than zero"));
    }

    Ok(())
}
