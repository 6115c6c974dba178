use thiserror::Error;

use epi_core::EpiError;

#[derive(Debug, Error, PartialEq)]
pub enum InterventionError {
    #[error("{policy}: start_day {start} is after end_day {end}")]
    InvalidWindow { policy: &'static str, start: u32, end: u32 },

    #[error(transparent)]
    Core(#[from] EpiError),
}

pub type InterventionResult<T> = Result<T, InterventionError>;
