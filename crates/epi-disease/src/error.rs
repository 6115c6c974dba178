use thiserror::Error;

use epi_core::EpiError;

/// Errors raised while assembling a [`DiseaseModel`][crate::DiseaseModel].
#[derive(Debug, Error, PartialEq)]
pub enum DiseaseError {
    #[error("unknown disease model {0:?} (expected SIR, SEIR-D or SEIAR-D)")]
    UnknownModel(String),

    #[error("{model} requires parameter `{param}`")]
    MissingParameter { model: &'static str, param: &'static str },

    #[error("{model} has a single infectious state; use one transmission probability")]
    SplitTransmission { model: &'static str },

    #[error("{state} period needs a finite mean and a finite, non-negative std_dev (got mean {mean}, std_dev {std_dev})")]
    InvalidPeriod { state: &'static str, mean: f64, std_dev: f64 },

    #[error(transparent)]
    Core(#[from] EpiError),
}

pub type DiseaseResult<T> = Result<T, DiseaseError>;
