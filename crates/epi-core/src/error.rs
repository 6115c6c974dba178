//! Shared error type and parameter validation helpers.
//!
//! Sub-crates define their own error enums and wrap `EpiError` as one
//! variant via `#[from]`, so the probability checks below can be reused with
//! `?` everywhere a configuration value is accepted.

use thiserror::Error;

/// The base error type for `epi-core` and a common variant for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum EpiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { what: String, value: f64 },

    #[error("{what} must be finite and non-negative, got {value}")]
    Negative { what: String, value: f64 },
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;

/// Accept `value` if it lies in `[0, 1]`; NaN is rejected.
pub fn check_probability(what: &str, value: f64) -> EpiResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EpiError::ProbabilityOutOfRange { what: what.to_owned(), value })
    }
}

/// Accept `value` if it is finite and `>= 0`.
pub fn check_non_negative(what: &str, value: f64) -> EpiResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EpiError::Negative { what: what.to_owned(), value })
    }
}
