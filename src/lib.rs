pub mod config;
pub mod error;
pub mod handler;
pub mod inference;
pub mod preprocess;
pub mod server;
pub mod storage;

pub use error::{Error, Result};
