use thiserror::Error;

/// Errors that can occur when loading or using a classifier
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode model artifact: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid evaluation config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
