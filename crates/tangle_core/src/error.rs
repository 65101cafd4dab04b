use thiserror::Error;

use crate::save::SaveError;

#[derive(Error, Debug)]
pub enum ProfilingError {
    /// A ledger was used outside its valid lifecycle phase.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A required identity or result field was absent.
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Persistence error: {0}")]
    Save(#[from] SaveError),
}

impl ProfilingError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        ProfilingError::InvalidState(msg.into())
    }

    pub fn missing_data(msg: impl Into<String>) -> Self {
        ProfilingError::MissingData(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ProfilingError>;
