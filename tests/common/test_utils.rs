use super::mocks::{MockInferenceClient, MockObjectStore};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use image_inference_handler::{
    config::{Config, InferenceConfig, LogsConfig, ServerConfig, StorageBackend, StorageConfig},
    handler::{HandlerSettings, InvocationEvent, RequestHandler},
};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

pub const TEST_ENDPOINT: &str = "image-classifier";
pub const TEST_BUCKET: &str = "inference-inputs";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        inference: InferenceConfig {
            endpoint_name: TEST_ENDPOINT.to_string(),
            base_url: "http://localhost:8081".to_string(),
        },
        storage: StorageConfig {
            bucket_name: TEST_BUCKET.to_string(),
            backend: StorageBackend::Http,
            url: Some("http://localhost:9000".to_string()),
            root: None,
            key_prefix: "inputs".to_string(),
        },
    }
}

pub fn create_test_settings() -> HandlerSettings {
    HandlerSettings::from(&create_test_config())
}

/// Create a handler wired to the given mocks
pub fn create_test_handler(
    store: &MockObjectStore,
    inference: &MockInferenceClient,
) -> RequestHandler {
    RequestHandler::new(
        Arc::new(store.clone()),
        Arc::new(inference.clone()),
        create_test_settings(),
    )
}

/// Solid-color image encoded in the given format
pub fn solid_image(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// The 10x10 red PNG used across the handler tests
pub fn red_png() -> Vec<u8> {
    solid_image(10, 10, [255, 0, 0], ImageFormat::Png)
}

pub fn encode_b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Invocation event whose body carries `image_b64`
pub fn image_event(image_b64: &str) -> InvocationEvent {
    InvocationEvent::with_body(json!({ "image_b64": image_b64 }).to_string())
}

pub fn red_png_event() -> InvocationEvent {
    image_event(&encode_b64(&red_png()))
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"

inference:
  endpoint_name: "image-classifier"
  base_url: "http://localhost:8081"

storage:
  bucket_name: "inference-inputs"
  type: "http"
  url: "http://localhost:9000"
"#;
