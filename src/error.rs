use alloy_primitives::Address;
use thiserror::Error;

use crate::chain::ChainError;
use crate::domain::DomainError;
use crate::provision::sequencer::ProvisionError;
use crate::provision::state::StateError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to read deployment registry: {0}")]
    ReadDeployment(#[source] std::io::Error),

    #[error("failed to parse deployment registry: {0}")]
    ParseDeployment(#[source] serde_json::Error),

    #[error("token '{symbol}' is not present in the deployment registry")]
    UnknownToken { symbol: String },

    #[error("contract '{name}' is not present in the deployment registry")]
    UnknownContract { name: String },

    #[error("failed to decrypt keystore: {reason}")]
    Keystore { reason: String },

    #[error("keystore account {actual} does not match configured sender {expected}")]
    SenderMismatch { expected: Address, actual: Address },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
