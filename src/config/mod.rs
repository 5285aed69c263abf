mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    load_with(&config_path, |key| env::var(key).ok()).await
}

/// Loads the YAML file at `config_path` (if any), applies overrides from
/// `lookup` and validates the result.
pub async fn load_with<F>(config_path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => serde_yaml::from_str::<Config>(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    apply_env_overrides(&mut config, lookup)?;
    config.validate()?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup("ENDPOINT_NAME") {
        config.inference.endpoint_name = endpoint;
    }
    if let Some(bucket) = lookup("BUCKET_NAME") {
        config.storage.bucket_name = bucket;
    }
    if let Some(url) = lookup("INFERENCE_URL") {
        config.inference.base_url = url;
    }
    if let Some(url) = lookup("STORAGE_URL") {
        config.storage.url = Some(url);
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    Ok(())
}
