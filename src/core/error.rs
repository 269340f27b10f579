use thiserror::Error;

#[derive(Error, Debug)]
pub enum RingfieldError {
    #[error("Invalid grid configuration: {0}")]
    InvalidGridConfig(String),

    #[error("Invalid match setup: {0}")]
    InvalidSetup(String),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(crate::core::types::UnitId),

    #[error("Team not found: {0:?}")]
    TeamNotFound(crate::core::types::TeamId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RingfieldError>;
