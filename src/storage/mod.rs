mod client;
mod http;
mod local;

pub use client::{ObjectStore, create_object_store, object_key};
pub use http::HttpObjectStore;
pub use local::LocalObjectStore;
