//! Network-subsystem error type.

use thiserror::Error;

use epi_core::EpiError;

/// Errors produced while building a contact network.
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("unknown network topology {0:?}")]
    UnknownTopology(String),

    #[error("topology {topology} requires parameter `{param}`")]
    MissingParameter { topology: &'static str, param: &'static str },

    #[error("topology {topology}: {reason}")]
    InvalidParameter { topology: &'static str, reason: String },

    #[error("network has {nodes} nodes but {max} is the largest supported count")]
    TooManyNodes { nodes: usize, max: usize },

    #[error(transparent)]
    Core(#[from] EpiError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
