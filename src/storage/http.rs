use super::client::{ObjectStore, check_segment};
use crate::{Error, Result, config::StorageConfig};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Object store speaking the path-style `PUT /{bucket}/{key}` protocol
/// shared by S3-compatible services.
pub struct HttpObjectStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let base_url = config
            .url
            .clone()
            .ok_or_else(|| Error::storage("HTTP object store requires url field"))?;

        Ok(Self::with_client(base_url, reqwest::Client::new()))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Each bucket and key segment is pushed separately so reserved
    /// characters are percent-encoded instead of read as URL syntax.
    fn object_url(&self, bucket: &str, key: &str) -> Result<reqwest::Url> {
        check_segment(bucket)?;
        let segments: Vec<&str> = key.trim_start_matches('/').split('/').collect();
        for segment in &segments {
            check_segment(segment)?;
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::storage(format!("Invalid object store url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::storage(format!(
                    "Object store url cannot hold a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(bucket)
            .extend(segments);

        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = self.object_url(bucket, key)?;
        debug!("PUT {} ({} bytes)", url, payload.len());

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::storage(format!("Failed to send put request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "put {}/{} failed with status {}: {}",
                bucket, key, status, body
            )));
        }

        Ok(())
    }
}
