use super::client::ObjectStore;
use crate::{Error, Result, config::StorageConfig};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Object store backed by a directory tree, `{root}/{bucket}/{key}`.
/// Useful for local runs where no object storage service is available.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let root = config
            .root
            .clone()
            .ok_or_else(|| Error::storage("Local object store requires root field"))?;

        Ok(Self::with_root(root))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in [bucket, key] {
            let relative = Path::new(segment);
            if relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
            {
                return Err(Error::storage(format!(
                    "Refusing to write outside the store: {}/{}",
                    bucket, key
                )));
            }
            path.push(relative);
        }
        Ok(path)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        debug!("Writing {} bytes to {}", payload.len(), path.display());

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, payload).await?;

        Ok(())
    }
}
