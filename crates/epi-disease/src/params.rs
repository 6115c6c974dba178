//! Raw disease parameters as supplied by configuration.

use serde::{Deserialize, Serialize};

use epi_core::SimRng;

use crate::{DiseaseError, DiseaseResult};

// ── Period ────────────────────────────────────────────────────────────────────

/// Normal distribution of a state's duration in days.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Period {
    pub mean:    f64,
    pub std_dev: f64,
}

impl Period {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// A period that always lasts exactly `days`.
    pub const fn fixed(days: f64) -> Self {
        Self { mean: days, std_dev: 0.0 }
    }

    /// Whole days spent in the state: the draw truncated toward zero, never
    /// less than one.
    pub fn draw(&self, rng: &mut SimRng) -> u32 {
        let days = rng.normal(self.mean, self.std_dev).trunc();
        if days >= 1.0 { days as u32 } else { 1 }
    }

    pub(crate) fn validate(self, state: &'static str) -> DiseaseResult<Self> {
        if self.mean.is_finite() && self.std_dev.is_finite() && self.std_dev >= 0.0 {
            Ok(self)
        } else {
            Err(DiseaseError::InvalidPeriod { state, mean: self.mean, std_dev: self.std_dev })
        }
    }
}

// ── Transmission ──────────────────────────────────────────────────────────────

/// Per-contact transmission probability of an infectious source.
///
/// In JSON either a bare number or
/// `{"symptomatic": 0.4, "asymptomatic": 0.05}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transmission {
    Single(f64),
    Split { symptomatic: f64, asymptomatic: f64 },
}

// ── DiseaseParams ─────────────────────────────────────────────────────────────

/// Everything a [`DiseaseModel`][crate::DiseaseModel] may need.  Each variant
/// reads only its own fields.
///
/// `mortality` is indexed by `AgeGroupId`; the caller expands a single
/// probability to one entry per group.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseParams {
    pub transmission:  Transmission,
    pub p_symptomatic: Option<f64>,
    pub incubation:    Option<Period>,
    /// Infectious period (symptomatic period for SEIAR-D).
    pub infectious:    Period,
    pub asymptomatic:  Option<Period>,
    pub mortality:     Vec<f64>,
}

impl Default for DiseaseParams {
    fn default() -> Self {
        Self {
            transmission:  Transmission::Split { symptomatic: 0.4, asymptomatic: 0.05 },
            p_symptomatic: Some(0.85),
            incubation:    Some(Period::new(3.0, 1.5)),
            infectious:    Period::new(7.0, 3.0),
            asymptomatic:  Some(Period::new(3.0, 1.5)),
            mortality:     vec![0.025],
        }
    }
}
