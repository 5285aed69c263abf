use super::types::*;
use crate::{
    Error, Result,
    config::Config,
    inference::{HttpInferenceClient, InferenceClient},
    preprocess::{self, JPEG_CONTENT_TYPE},
    storage::{ObjectStore, create_object_store, object_key},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Settings resolved once at start-up and shared by every invocation.
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    pub endpoint_name: String,
    pub bucket_name: String,
    pub key_prefix: String,
}

impl From<&Config> for HandlerSettings {
    fn from(config: &Config) -> Self {
        Self {
            endpoint_name: config.inference.endpoint_name.clone(),
            bucket_name: config.storage.bucket_name.clone(),
            key_prefix: config.storage.key_prefix.clone(),
        }
    }
}

pub struct RequestHandler {
    store: Arc<dyn ObjectStore>,
    inference: Arc<dyn InferenceClient>,
    settings: HandlerSettings,
}

impl RequestHandler {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        inference: Arc<dyn InferenceClient>,
        settings: HandlerSettings,
    ) -> Self {
        Self {
            store,
            inference,
            settings,
        }
    }

    /// Build the handler with the collaborators named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = create_object_store(&config.storage)?;
        let inference = Arc::new(HttpInferenceClient::new(&config.inference));

        info!(
            "Handler configured for endpoint '{}' and bucket '{}'",
            config.inference.endpoint_name, config.storage.bucket_name
        );

        Ok(Self::new(store, inference, HandlerSettings::from(config)))
    }

    /// Run one invocation and shape the outcome for the host. Any error
    /// returned here is an abnormal termination of the invocation.
    pub async fn handle(
        &self,
        event: InvocationEvent,
        context: &InvocationContext,
    ) -> Result<InvocationResponse> {
        match self.process(event, context).await {
            Ok(response) => response.into_invocation_response(),
            Err(e) => {
                error!(
                    "Invocation {} failed ({}): {}",
                    context.request_id,
                    e.kind(),
                    e
                );
                Err(e)
            }
        }
    }

    pub async fn process(
        &self,
        event: InvocationEvent,
        context: &InvocationContext,
    ) -> Result<InferenceResponse> {
        info!("Received invocation: {}", context.request_id);

        let image_b64 = match event.payload()?.require_image() {
            Ok(image) => image,
            Err(Error::Validation(message)) => {
                warn!("Rejected invocation {}: {}", context.request_id, message);
                return Ok(InferenceResponse::Rejected(message));
            }
            Err(e) => return Err(e),
        };

        let key = object_key(&self.settings.key_prefix, &context.request_id)?;

        let request = InferenceRequest {
            image_bytes: preprocess::decode_base64(&image_b64)?,
            request_id: context.request_id.clone(),
        };

        let payload = normalize(request.image_bytes).await?;

        self.store
            .put_object(
                &self.settings.bucket_name,
                &key,
                payload.clone(),
                JPEG_CONTENT_TYPE,
            )
            .await?;
        debug!("Stored {}/{}", self.settings.bucket_name, key);

        let raw = self
            .inference
            .invoke(&self.settings.endpoint_name, JPEG_CONTENT_TYPE, payload)
            .await?;
        let predictions = parse_predictions(&raw)?;

        info!("Invocation {} completed", request.request_id);

        Ok(InferenceResponse::Predictions(predictions))
    }
}

async fn normalize(image_bytes: Vec<u8>) -> Result<Vec<u8>> {
    debug!(
        "Normalizing {} byte image (format: {:?})",
        image_bytes.len(),
        preprocess::sniff_format(&image_bytes)
    );

    tokio::task::spawn_blocking(move || preprocess::normalize_to_jpeg(&image_bytes))
        .await
        .map_err(|e| Error::internal(format!("Normalization task failed: {}", e)))?
}
