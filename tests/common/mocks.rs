use async_trait::async_trait;
use image_inference_handler::{Error, Result, inference::InferenceClient, storage::ObjectStore};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub payload: Vec<u8>,
    pub content_type: String,
}

/// Mock object store for testing
#[derive(Debug, Clone)]
pub struct MockObjectStore {
    pub objects: Arc<Mutex<Vec<StoredObject>>>,
    pub error: Option<String>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        if let Some(ref error) = self.error {
            return Err(Error::storage(error.clone()));
        }

        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            payload,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub endpoint: String,
    pub content_type: String,
    pub payload: Vec<u8>,
}

/// Mock inference endpoint for testing. Answers every call with the same body.
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    pub response: Vec<u8>,
    pub invocations: Arc<Mutex<Vec<Invocation>>>,
    pub error: Option<String>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::with_response(br#"{"predictions":[0.1,0.9]}"#.to_vec())
    }

    pub fn with_response(response: impl Into<Vec<u8>>) -> Self {
        Self {
            response: response.into(),
            invocations: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn invoke(
        &self,
        endpoint: &str,
        content_type: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>> {
        self.invocations.lock().unwrap().push(Invocation {
            endpoint: endpoint.to_string(),
            content_type: content_type.to_string(),
            payload,
        });

        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }

        Ok(self.response.clone())
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}
