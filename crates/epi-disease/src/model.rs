//! The generic disease-model descriptor.
//!
//! One [`DiseaseModel`] value describes a whole variant: its ordered states,
//! which of them transmit, and a transition table saying how long each timed
//! state lasts and where it leads.  Agents and the engine are written once
//! against this table; nothing downstream branches on the variant.
//!
//! | Variant   | States                  | Entry | Timed          |
//! |-----------|-------------------------|-------|----------------|
//! | `SIR`     | S, I, R                 | I     | I              |
//! | `SEIR-D`  | S, E, I, R, D           | E     | E, I           |
//! | `SEIAR-D` | S, E, IA, IS, R, D      | E     | E, IA, IS      |

use std::fmt;
use std::str::FromStr;

use log::warn;

use epi_core::{check_probability, AgeGroupId, SimRng};

use crate::{Compartment, DiseaseError, DiseaseParams, DiseaseResult, Period, Transmission};

// ── ModelKind ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ModelKind {
    Sir,
    Seird,
    Seiard,
}

impl ModelKind {
    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Sir    => "SIR",
            ModelKind::Seird  => "SEIR-D",
            ModelKind::Seiard => "SEIAR-D",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelKind {
    type Err = DiseaseError;

    /// Case-insensitive; hyphens, underscores and spaces are ignored.
    fn from_str(s: &str) -> DiseaseResult<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        match key.as_str() {
            "SIR"              => Ok(ModelKind::Sir),
            "SEIRD" | "SEIR"   => Ok(ModelKind::Seird),
            "SEIARD" | "SEIAR" => Ok(ModelKind::Seiard),
            _ => Err(DiseaseError::UnknownModel(s.to_owned())),
        }
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

/// What happens when a timed state's countdown reaches zero.
#[derive(Clone, Debug, PartialEq)]
pub enum Expiry {
    /// Always move to the given state.
    Advance(Compartment),
    /// Bernoulli split: `success` with `probability`, otherwise `failure`.
    Branch { probability: f64, success: Compartment, failure: Compartment },
    /// Dead with the agent's age-group mortality, otherwise recovered.
    Resolve { mortality: Vec<f64> },
}

impl Expiry {
    /// Pick the next state for an agent of `age_group`.
    pub fn next(&self, age_group: AgeGroupId, rng: &mut SimRng) -> Compartment {
        match self {
            Expiry::Advance(to) => *to,
            Expiry::Branch { probability, success, failure } => {
                if rng.gen_bool(*probability) { *success } else { *failure }
            }
            Expiry::Resolve { mortality } => {
                let p = mortality.get(age_group.index()).copied().unwrap_or(0.0);
                if rng.gen_bool(p) { Compartment::Dead } else { Compartment::Recovered }
            }
        }
    }
}

/// Timer and expiry rule of one timed state.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub period: Period,
    pub expiry: Expiry,
}

// ── DiseaseModel ──────────────────────────────────────────────────────────────

/// Descriptor of one disease-model variant.  Build with [`DiseaseModel::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseModel {
    kind:         ModelKind,
    states:       Vec<Compartment>,
    entry:        Compartment,
    transitions:  [Option<Transition>; Compartment::COUNT],
    transmission: [f64; Compartment::COUNT],
    infectious:   [bool; Compartment::COUNT],
}

impl DiseaseModel {
    /// Validate `params` for `kind` and build the descriptor.
    ///
    /// Every supplied probability must lie in `[0, 1]`, including ones the
    /// variant does not use, and every period used by the variant must be
    /// well formed.  Unused parameters are then ignored with a warning.
    pub fn new(kind: ModelKind, params: &DiseaseParams) -> DiseaseResult<Self> {
        for &p in &params.mortality {
            check_probability("mortality", p)?;
        }
        if let Some(p) = params.p_symptomatic {
            check_probability("p_symptomatic", p)?;
            if kind != ModelKind::Seiard {
                warn!("{} has no symptomatic split; p_symptomatic is ignored", kind.label());
            }
        }
        let infectious = params.infectious.validate("infectious")?;
        match kind {
            ModelKind::Sir => {
                let rate = match params.transmission {
                    Transmission::Single(p) => check_probability("transmission", p)?,
                    Transmission::Split { .. } => {
                        return Err(DiseaseError::SplitTransmission { model: kind.label() });
                    }
                };
                if params.mortality.iter().any(|&p| p > 0.0) {
                    warn!("SIR has no death state; mortality parameters are ignored");
                }
                let mut m = Self::empty(kind, &[
                    Compartment::Susceptible,
                    Compartment::Infectious,
                    Compartment::Recovered,
                ], Compartment::Infectious);
                m.set_infectious(Compartment::Infectious, rate);
                m.set_transition(Compartment::Infectious, infectious, Expiry::Advance(Compartment::Recovered));
                Ok(m)
            }

            ModelKind::Seird => {
                let rate = match params.transmission {
                    Transmission::Single(p) => check_probability("transmission", p)?,
                    Transmission::Split { .. } => {
                        return Err(DiseaseError::SplitTransmission { model: kind.label() });
                    }
                };
                let incubation = Self::required(kind, "incubation", params.incubation)?
                    .validate("incubation")?;
                let mortality = Self::mortality(kind, &params.mortality)?;
                let mut m = Self::empty(kind, &[
                    Compartment::Susceptible,
                    Compartment::Exposed,
                    Compartment::Infectious,
                    Compartment::Recovered,
                    Compartment::Dead,
                ], Compartment::Exposed);
                m.set_infectious(Compartment::Infectious, rate);
                m.set_transition(Compartment::Exposed, incubation, Expiry::Advance(Compartment::Infectious));
                m.set_transition(Compartment::Infectious, infectious, Expiry::Resolve { mortality });
                Ok(m)
            }

            ModelKind::Seiard => {
                let (symptomatic, asymptomatic) = match params.transmission {
                    Transmission::Single(p) => {
                        let p = check_probability("transmission", p)?;
                        (p, p)
                    }
                    Transmission::Split { symptomatic, asymptomatic } => (
                        check_probability("transmission.symptomatic", symptomatic)?,
                        check_probability("transmission.asymptomatic", asymptomatic)?,
                    ),
                };
                let p_symptomatic = check_probability(
                    "p_symptomatic",
                    Self::required(kind, "p_symptomatic", params.p_symptomatic)?,
                )?;
                let incubation = Self::required(kind, "incubation", params.incubation)?
                    .validate("incubation")?;
                let asymptomatic_period = Self::required(kind, "asymptomatic", params.asymptomatic)?
                    .validate("asymptomatic")?;
                let mortality = Self::mortality(kind, &params.mortality)?;

                let mut m = Self::empty(kind, &[
                    Compartment::Susceptible,
                    Compartment::Exposed,
                    Compartment::Asymptomatic,
                    Compartment::Symptomatic,
                    Compartment::Recovered,
                    Compartment::Dead,
                ], Compartment::Exposed);
                m.set_infectious(Compartment::Symptomatic, symptomatic);
                m.set_infectious(Compartment::Asymptomatic, asymptomatic);
                m.set_transition(Compartment::Exposed, incubation, Expiry::Branch {
                    probability: p_symptomatic,
                    success:     Compartment::Symptomatic,
                    failure:     Compartment::Asymptomatic,
                });
                m.set_transition(Compartment::Symptomatic, infectious, Expiry::Resolve {
                    mortality: mortality.clone(),
                });
                m.set_transition(Compartment::Asymptomatic, asymptomatic_period, Expiry::Resolve {
                    mortality,
                });
                Ok(m)
            }
        }
    }

    fn empty(kind: ModelKind, states: &[Compartment], entry: Compartment) -> Self {
        Self {
            kind,
            states:       states.to_vec(),
            entry,
            transitions:  std::array::from_fn(|_| None),
            transmission: [0.0; Compartment::COUNT],
            infectious:   [false; Compartment::COUNT],
        }
    }

    fn set_infectious(&mut self, state: Compartment, rate: f64) {
        self.infectious[state.slot()]   = true;
        self.transmission[state.slot()] = rate;
    }

    fn set_transition(&mut self, state: Compartment, period: Period, expiry: Expiry) {
        self.transitions[state.slot()] = Some(Transition { period, expiry });
    }

    fn required<T>(kind: ModelKind, param: &'static str, value: Option<T>) -> DiseaseResult<T> {
        value.ok_or(DiseaseError::MissingParameter { model: kind.label(), param })
    }

    fn mortality(kind: ModelKind, by_group: &[f64]) -> DiseaseResult<Vec<f64>> {
        if by_group.is_empty() {
            return Err(DiseaseError::MissingParameter { model: kind.label(), param: "mortality" });
        }
        by_group
            .iter()
            .map(|&p| check_probability("mortality", p).map_err(DiseaseError::from))
            .collect()
    }

    // ── Shape ─────────────────────────────────────────────────────────────

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The model's states in reporting order.
    pub fn states(&self) -> &[Compartment] {
        &self.states
    }

    /// State codes in reporting order (`["S", "E", "IA", ...]`).
    pub fn codes(&self) -> Vec<&'static str> {
        self.states.iter().map(|s| s.code()).collect()
    }

    /// The first post-exposure state.
    pub fn entry(&self) -> Compartment {
        self.entry
    }

    /// Position of `state` in [`states`](Self::states).
    pub fn index_of(&self, state: Compartment) -> Option<usize> {
        self.states.iter().position(|&s| s == state)
    }

    pub fn contains(&self, state: Compartment) -> bool {
        self.index_of(state).is_some()
    }

    // ── State predicates ──────────────────────────────────────────────────

    #[inline]
    pub fn is_susceptible(&self, state: Compartment) -> bool {
        state == Compartment::Susceptible
    }

    #[inline]
    pub fn is_infectious(&self, state: Compartment) -> bool {
        self.infectious[state.slot()]
    }

    /// States with a countdown timer.
    #[inline]
    pub fn is_timed(&self, state: Compartment) -> bool {
        self.transitions[state.slot()].is_some()
    }

    /// Exposed or infectious: the epidemic is still running while any agent
    /// is in one of these.
    #[inline]
    pub fn is_active(&self, state: Compartment) -> bool {
        self.is_timed(state)
    }

    pub fn is_terminal(&self, state: Compartment) -> bool {
        self.contains(state) && !self.is_timed(state) && !self.is_susceptible(state)
    }

    // ── Dynamics ──────────────────────────────────────────────────────────

    /// Per-contact transmission probability of a source in `state`
    /// (`0.0` for non-infectious states).
    #[inline]
    pub fn transmission_rate(&self, state: Compartment) -> f64 {
        self.transmission[state.slot()]
    }

    #[inline]
    pub fn transition(&self, state: Compartment) -> Option<&Transition> {
        self.transitions[state.slot()].as_ref()
    }

    /// Fresh countdown for an agent entering `state`; `0` for untimed states.
    pub fn draw_period(&self, state: Compartment, rng: &mut SimRng) -> u32 {
        match self.transition(state) {
            Some(t) => t.period.draw(rng),
            None    => 0,
        }
    }
}
