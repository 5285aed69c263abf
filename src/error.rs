use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Inference endpoint error: {0}")]
    Inference(String),

    #[error("Invalid inference response: {0}")]
    ResponseParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn response_parse(msg: impl Into<String>) -> Self {
        Self::ResponseParse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short, stable name reported to the host as the failure type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigurationError",
            Self::Validation(_) => "ValidationError",
            Self::Base64(_) | Self::Image(_) | Self::Serialization(_) => "DecodingError",
            Self::Storage(_) | Self::Inference(_) | Self::Network(_) => "CollaboratorError",
            Self::ResponseParse(_) => "ResponseParseError",
            Self::Yaml(_) | Self::AddrParse(_) => "ConfigurationError",
            Self::Io(_) | Self::Internal(_) => "InternalError",
        }
    }
}
