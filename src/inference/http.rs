use super::client::InferenceClient;
use crate::{Error, Result, config::InferenceConfig};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

/// Client for a hosted model endpoint exposing
/// `POST {base_url}/endpoints/{name}/invocations`.
pub struct HttpInferenceClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpInferenceClient {
    pub fn new(config: &InferenceConfig) -> Self {
        Self::with_client(config.base_url.clone(), reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn invocation_url(&self, endpoint: &str) -> String {
        format!("{}/endpoints/{}/invocations", self.base_url, endpoint)
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn invoke(
        &self,
        endpoint: &str,
        content_type: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let url = self.invocation_url(endpoint);
        debug!("Invoking endpoint {} with {} bytes", endpoint, payload.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::inference(format!("Failed to send invocation request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::inference(format!(
                "endpoint {} returned status {}: {}",
                endpoint, status, body
            )));
        }

        let body = response.bytes().await?;
        debug!("Endpoint {} responded with {} bytes", endpoint, body.len());

        Ok(body.to_vec())
    }
}
