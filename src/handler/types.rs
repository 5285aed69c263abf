use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const MISSING_IMAGE_MESSAGE: &str = "image_b64 required";

pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Event delivered by the host for one invocation. Keys other than `body`
/// are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub body: Option<String>,
}

impl InvocationEvent {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    /// Parse the JSON body. A missing body reads as an empty object.
    pub fn payload(&self) -> Result<ImagePayload> {
        let body = self.body.as_deref().unwrap_or("{}");
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Request ids end up in storage keys, so only short ids made of
    /// ASCII letters, digits, `-` and `_` are taken from callers.
    pub fn is_valid_request_id(id: &str) -> bool {
        !id.is_empty()
            && id.len() <= MAX_REQUEST_ID_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub image_b64: Option<String>,
}

impl ImagePayload {
    /// The base64 image text, or a validation error when missing, null or empty.
    pub fn require_image(self) -> Result<String> {
        match self.image_b64 {
            Some(image) if !image.is_empty() => Ok(image),
            _ => Err(Error::validation(MISSING_IMAGE_MESSAGE)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub image_bytes: Vec<u8>,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResponse {
    Predictions(Value),
    Rejected(String),
}

impl InferenceResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Predictions(_) => 200,
            Self::Rejected(_) => 400,
        }
    }

    pub fn into_invocation_response(self) -> Result<InvocationResponse> {
        let status_code = self.status_code();
        let body = match self {
            Self::Predictions(predictions) => {
                serde_json::to_string(&json!({ "predictions": predictions }))?
            }
            Self::Rejected(message) => message,
        };

        Ok(InvocationResponse { status_code, body })
    }
}

/// Wire shape returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Read the predictions out of an endpoint response body. An object with a
/// `predictions` member yields that member, anything else is used whole.
pub fn parse_predictions(raw: &[u8]) -> Result<Value> {
    let mut document: Value = serde_json::from_slice(raw)
        .map_err(|e| Error::response_parse(format!("endpoint body is not JSON: {}", e)))?;

    if let Value::Object(map) = &mut document {
        if let Some(predictions) = map.remove("predictions") {
            return Ok(predictions);
        }
    }

    Ok(document)
}
