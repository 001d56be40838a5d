//! Error types for Bizpilot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Holds the artifact path, which is left out of the message
    #[error("No trained model found. Train the scenario model first.")]
    ModelNotFound(String),

    #[error("Corrupt model artifact: {0}")]
    CorruptArtifact(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
