use super::{http::HttpObjectStore, local::LocalObjectStore};
use crate::{
    Error, Result,
    config::{StorageBackend, StorageConfig},
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `payload` under `bucket`/`key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

pub fn create_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.backend {
        StorageBackend::Http => Ok(Arc::new(HttpObjectStore::new(config)?)),
        StorageBackend::Local => Ok(Arc::new(LocalObjectStore::new(config)?)),
    }
}

/// Build the storage key for a request: `{prefix}/{request_id}.jpg`.
/// The request id must form a single plain path segment.
pub fn object_key(prefix: &str, request_id: &str) -> Result<String> {
    check_segment(request_id)?;

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        Ok(format!("{}.jpg", request_id))
    } else {
        Ok(format!("{}/{}.jpg", prefix, request_id))
    }
}

/// Reject segments that a path or URL would reinterpret.
pub(crate) fn check_segment(segment: &str) -> Result<()> {
    let reinterpreted = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());

    if reinterpreted {
        return Err(Error::storage(format!(
            "Invalid object key segment: {:?}",
            segment
        )));
    }

    Ok(())
}
