use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub endpoint_name: String,
    #[serde(default = "default_inference_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub bucket_name: String,
    #[serde(rename = "type", default)]
    pub backend: StorageBackend,
    // Http specific fields
    pub url: Option<String>,
    // Local specific fields
    pub root: Option<String>,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Http,
    Local,
}

impl Config {
    /// Checks the settings the handler cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.inference.endpoint_name.trim().is_empty() {
            return Err(Error::config(
                "inference endpoint name is required (ENDPOINT_NAME)",
            ));
        }

        if self.storage.bucket_name.trim().is_empty() {
            return Err(Error::config("storage bucket name is required (BUCKET_NAME)"));
        }

        match self.storage.backend {
            StorageBackend::Http if self.storage.url.is_none() => Err(Error::config(
                "http storage backend requires url field (STORAGE_URL)",
            )),
            StorageBackend::Local if self.storage.root.is_none() => {
                Err(Error::config("local storage backend requires root field"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint_name: String::new(),
            base_url: default_inference_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: String::new(),
            backend: StorageBackend::default(),
            url: None,
            root: None,
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_inference_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_key_prefix() -> String {
    "inputs".to_string()
}
