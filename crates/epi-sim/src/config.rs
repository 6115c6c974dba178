//! Run configuration.
//!
//! Every field has a default, so a JSON document only needs to name what
//! it changes:
//!
//! ```json
//! {
//!   "model": "SEIR-D",
//!   "population": 500,
//!   "transmission": 0.3,
//!   "network": { "topology": "erdos_renyi", "params": { "edge_probability": 0.02 } },
//!   "interventions": [
//!     { "kind": "lockdown", "start_day": 10, "end_day": 30, "reduction_factor": 0.4 }
//!   ]
//! }
//! ```
//!
//! Nothing here is checked at parse time beyond JSON shape; all semantic
//! validation happens in [`SimBuilder::build`][crate::SimBuilder::build].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use epi_agent::{AgeGroup, AgeStructure};
use epi_disease::{DiseaseParams, ModelKind, Period, Transmission};
use epi_intervention::InterventionConfig;
use epi_network::TopologyParams;

use crate::{SimError, SimResult};

// ── Sub-sections ──────────────────────────────────────────────────────────────

/// Death probability at the end of an infectious period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mortality {
    Uniform(f64),
    ByGroup(BTreeMap<String, f64>),
}

/// Per-group tables keyed by group name.  Groups are ordered by name.
///
/// `susceptibility` defaults to 1 and `contacts_per_day` to the top-level
/// scalar for every group when omitted; when present, their key sets must
/// equal the key set of `distribution`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeGroupsConfig {
    pub distribution:     BTreeMap<String, f64>,
    #[serde(default)]
    pub susceptibility:   Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub contacts_per_day: Option<BTreeMap<String, u32>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub topology: String,
    #[serde(default)]
    pub params:   TopologyParams,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            topology: "watts_strogatz".to_owned(),
            params:   TopologyParams {
                mean_degree:        Some(10),
                rewire_probability: Some(0.1),
                ..TopologyParams::default()
            },
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// `SIR`, `SEIR-D` or `SEIAR-D`.
    pub model: String,

    pub population: usize,

    /// Agents infected before day 0.  Must satisfy `0 < I0 <= population`.
    pub initial_infected: usize,

    /// Master RNG seed.  `None` draws one from OS entropy; the chosen value
    /// is logged and available from `Sim::seed`.
    pub seed: Option<u64>,

    /// Contacts per day for every group when `age_groups` does not override it.
    pub contacts_per_day: u32,

    pub transmission: Transmission,

    /// SEIAR-D only: probability an exposed agent becomes symptomatic.
    pub p_symptomatic: Option<f64>,

    pub incubation: Option<Period>,

    /// Infectious period (symptomatic period for SEIAR-D).
    pub infectious: Period,

    /// SEIAR-D only: asymptomatic infectious period.
    pub asymptomatic: Option<Period>,

    pub mortality: Mortality,

    pub age_groups: Option<AgeGroupsConfig>,

    pub network: NetworkConfig,

    pub interventions: Vec<InterventionConfig>,

    /// Keep a per-agent state vector for every recorded day.
    pub record_snapshots: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        let disease = DiseaseParams::default();
        Self {
            model:            ModelKind::Seiard.label().to_owned(),
            population:       1_000,
            initial_infected: 10,
            seed:             None,
            contacts_per_day: 10,
            transmission:     disease.transmission,
            p_symptomatic:    disease.p_symptomatic,
            incubation:       disease.incubation,
            infectious:       disease.infectious,
            asymptomatic:     disease.asymptomatic,
            mortality:        Mortality::Uniform(0.025),
            age_groups:       None,
            network:          NetworkConfig::default(),
            interventions:    Vec::new(),
            record_snapshots: false,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn model_kind(&self) -> SimResult<ModelKind> {
        Ok(self.model.parse()?)
    }

    /// Resolve the age-group tables into an [`AgeStructure`].
    pub fn age_structure(&self) -> SimResult<AgeStructure> {
        let Some(tables) = &self.age_groups else {
            return Ok(AgeStructure::single(self.contacts_per_day));
        };
        let names: Vec<String> = tables.distribution.keys().cloned().collect();
        if let Some(susceptibility) = &tables.susceptibility {
            check_keys("susceptibility", &names, susceptibility)?;
        }
        if let Some(contacts) = &tables.contacts_per_day {
            check_keys("contacts_per_day", &names, contacts)?;
        }

        let groups = tables
            .distribution
            .iter()
            .map(|(name, &weight)| AgeGroup {
                name: name.clone(),
                weight,
                susceptibility: tables
                    .susceptibility
                    .as_ref()
                    .and_then(|m| m.get(name).copied())
                    .unwrap_or(1.0),
                contacts_per_day: tables
                    .contacts_per_day
                    .as_ref()
                    .and_then(|m| m.get(name).copied())
                    .unwrap_or(self.contacts_per_day),
            })
            .collect();
        Ok(AgeStructure::new(groups)?)
    }

    /// Disease parameters with mortality expanded to one entry per group of
    /// `ages`.
    pub fn disease_params(&self, ages: &AgeStructure) -> SimResult<DiseaseParams> {
        let mortality = match &self.mortality {
            Mortality::Uniform(p) => vec![*p; ages.len()],
            Mortality::ByGroup(by_group) => {
                let names: Vec<String> = ages.groups().iter().map(|g| g.name.clone()).collect();
                check_keys("mortality", &names, by_group)?;
                ages.groups()
                    .iter()
                    .map(|g| by_group.get(&g.name).copied().unwrap_or(0.0))
                    .collect()
            }
        };
        Ok(DiseaseParams {
            transmission:  self.transmission,
            p_symptomatic: self.p_symptomatic,
            incubation:    self.incubation,
            infectious:    self.infectious,
            asymptomatic:  self.asymptomatic,
            mortality,
        })
    }
}

fn check_keys<V>(table: &'static str, expected: &[String], map: &BTreeMap<String, V>) -> SimResult<()> {
    let want: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    let got: BTreeSet<&str> = map.keys().map(String::as_str).collect();
    if want == got {
        return Ok(());
    }
    Err(SimError::AgeGroupMismatch {
        table,
        expected: want.into_iter().map(str::to_owned).collect(),
        got:      got.into_iter().map(str::to_owned).collect(),
    })
}
