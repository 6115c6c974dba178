//! The mutable engine state interventions are allowed to touch.

use epi_agent::Population;
use epi_core::{AgeGroupId, Day, SimRng};
use epi_disease::DiseaseModel;

// ── ContactRates ──────────────────────────────────────────────────────────────

/// Per-age-group contacts per day: the configured base and the value in
/// effect today.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRates {
    base:    Vec<u32>,
    current: Vec<u32>,
}

impl ContactRates {
    pub fn new(base: Vec<u32>) -> Self {
        Self { current: base.clone(), base }
    }

    pub fn base(&self) -> &[u32] {
        &self.base
    }

    pub fn current(&self) -> &[u32] {
        &self.current
    }

    /// Today's contact count for `group` (`0` for an unknown group).
    #[inline]
    pub fn get(&self, group: AgeGroupId) -> u32 {
        self.current.get(group.index()).copied().unwrap_or(0)
    }

    pub fn set(&mut self, group: AgeGroupId, contacts: u32) {
        if let Some(slot) = self.current.get_mut(group.index()) {
            *slot = contacts;
        }
    }

    /// `current[g] = floor(base[g] * factor)` for every group.
    pub fn scale_from_base(&mut self, factor: f64) {
        for (cur, &base) in self.current.iter_mut().zip(&self.base) {
            *cur = (base as f64 * factor).floor() as u32;
        }
    }

    /// Restore the unmodified base counts.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.base);
    }
}

// ── InterventionContext ───────────────────────────────────────────────────────

/// Exclusive view of the engine handed to each intervention at the start of
/// a day, before any exposure is computed.
pub struct InterventionContext<'a> {
    pub day:        Day,
    pub contacts:   &'a mut ContactRates,
    pub population: &'a mut Population,
    pub model:      &'a DiseaseModel,
    pub rng:        &'a mut SimRng,
}
