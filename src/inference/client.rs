use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send `payload` to the named endpoint and return the raw response body.
    async fn invoke(
        &self,
        endpoint: &str,
        content_type: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>>;
}
