use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Worker not found: {0:?}")]
    WorkerNotFound(crate::core::types::WorkerId),

    #[error("Work order not found: {0:?}")]
    OrderNotFound(crate::core::types::TaskId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
