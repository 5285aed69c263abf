mod client;
mod http;

pub use client::InferenceClient;
pub use http::HttpInferenceClient;
