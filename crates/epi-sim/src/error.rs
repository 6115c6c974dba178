use std::path::PathBuf;

use thiserror::Error;

use epi_core::EpiError;
use epi_disease::DiseaseError;
use epi_intervention::InterventionError;
use epi_network::NetworkError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("age-group table `{table}` has keys {got:?}, expected {expected:?}")]
    AgeGroupMismatch {
        table:    &'static str,
        expected: Vec<String>,
        got:      Vec<String>,
    },

    #[error("cannot read configuration {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Disease(#[from] DiseaseError),

    #[error(transparent)]
    Intervention(#[from] InterventionError),

    #[error(transparent)]
    Core(#[from] EpiError),
}

pub type SimResult<T> = Result<T, SimError>;
