//! The per-individual disease record and its state-machine contract.

use epi_core::{AgeGroupId, AgentId, SimRng};
use epi_disease::{Compartment, DiseaseModel};

/// One individual.
///
/// `state` and `days_remaining` are driven by the active [`DiseaseModel`]
/// through [`infect`](Self::infect) and [`progress`](Self::progress).
/// `mask_efficacy` and `immune` are written by interventions between days.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:             AgentId,
    pub state:          Compartment,
    /// Days left in the current timed state; `0` in untimed states.
    pub days_remaining: u32,
    pub age_group:      AgeGroupId,
    /// Fraction of outgoing transmission blocked, in `[0, 1]`.
    pub mask_efficacy:  f64,
    /// Set by vaccination.  An immune agent stays in `Susceptible` but is
    /// never exposed.
    pub immune:         bool,
}

impl Agent {
    /// A susceptible, unmasked, non-immune agent.
    pub fn new(id: AgentId, age_group: AgeGroupId) -> Self {
        Self {
            id,
            state: Compartment::Susceptible,
            days_remaining: 0,
            age_group,
            mask_efficacy: 0.0,
            immune: false,
        }
    }

    #[inline]
    pub fn is_susceptible(&self, model: &DiseaseModel) -> bool {
        model.is_susceptible(self.state)
    }

    #[inline]
    pub fn is_infectious(&self, model: &DiseaseModel) -> bool {
        model.is_infectious(self.state)
    }

    /// Susceptible and not immune: a valid exposure target.
    #[inline]
    pub fn is_exposable(&self, model: &DiseaseModel) -> bool {
        self.is_susceptible(model) && !self.immune
    }

    /// Exposed or infectious.
    #[inline]
    pub fn is_active(&self, model: &DiseaseModel) -> bool {
        model.is_active(self.state)
    }

    /// Move an exposable agent into the model's entry state with a fresh
    /// timer.
    ///
    /// Returns `false` and leaves the agent untouched if it is not
    /// susceptible or is immune, so repeated calls never re-arm a timer.
    pub fn infect(&mut self, model: &DiseaseModel, rng: &mut SimRng) -> bool {
        if !self.is_exposable(model) {
            return false;
        }
        self.enter(model.entry(), model, rng);
        true
    }

    /// Advance one day.  Untimed states are left alone; a timed state counts
    /// down and fires its expiry rule when the countdown reaches zero.
    pub fn progress(&mut self, model: &DiseaseModel, rng: &mut SimRng) {
        let Some(transition) = model.transition(self.state) else {
            return;
        };
        self.days_remaining = self.days_remaining.saturating_sub(1);
        if self.days_remaining > 0 {
            return;
        }
        let next = transition.expiry.next(self.age_group, rng);
        self.enter(next, model, rng);
    }

    fn enter(&mut self, state: Compartment, model: &DiseaseModel, rng: &mut SimRng) {
        self.state = state;
        self.days_remaining = model.draw_period(state, rng);
    }
}
