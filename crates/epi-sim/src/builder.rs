//! Fluent builder for constructing a [`Sim`].

use log::info;
use rustc_hash::FxHashSet;

use epi_agent::PopulationBuilder;
use epi_core::{AgentId, Day, SimRng};
use epi_disease::DiseaseModel;
use epi_intervention::{ContactRates, Intervention, InterventionManager};
use epi_network::{ContactNetwork, Topology};

use crate::{History, Sim, SimConfig, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: population, disease parameters, network, interventions…
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                                         |
/// |----------------------------|-------------------------------------------------|
/// | `.network(n)`              | generated from `config.network`                 |
/// | `.initial_infected(ids)`   | `config.initial_infected` agents drawn at random |
/// | `.intervention(i)`         | only the interventions listed in the config     |
///
/// # Example
///
/// ```rust,ignore
/// let config = SimConfig::from_json_path("scenario.json")?;
/// let mut sim = SimBuilder::new(config)
///     .intervention(MyPolicy::default())
///     .build()?;
/// sim.run(180);
/// println!("{:?}", sim.history().last());
/// ```
///
/// # Randomness
///
/// The engine RNG is consumed in a fixed order: network generation, age
/// assignment, choice of initial cases, their timers.  The same config and
/// seed therefore always build the same engine.
pub struct SimBuilder {
    config:           SimConfig,
    network:          Option<ContactNetwork>,
    initial_infected: Option<Vec<AgentId>>,
    interventions:    Vec<Box<dyn Intervention>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            network:          None,
            initial_infected: None,
            interventions:    Vec::new(),
        }
    }

    /// Use a prebuilt contact network instead of generating one.  Its node
    /// count must equal `config.population`.
    pub fn network(mut self, network: ContactNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Infect exactly these agents before day 0 instead of drawing
    /// `config.initial_infected` at random.
    pub fn initial_infected(mut self, ids: Vec<AgentId>) -> Self {
        self.initial_infected = Some(ids);
        self
    }

    /// Register an extra intervention.  Runs after the configured ones, in
    /// call order.
    pub fn intervention<I: Intervention + 'static>(mut self, intervention: I) -> Self {
        self.interventions.push(Box::new(intervention));
        self
    }

    /// Validate everything, then build the network, population and initial
    /// infections.  No engine exists unless every check passes.
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        let n = config.population;

        // ── Validate ──────────────────────────────────────────────────────
        if n == 0 {
            return Err(SimError::Config("population must be positive".into()));
        }
        if n > u32::MAX as usize {
            return Err(SimError::Config(format!("population {n} exceeds {}", u32::MAX)));
        }
        let initial_count = match &self.initial_infected {
            Some(ids) => {
                validate_initial_ids(ids, n)?;
                ids.len()
            }
            None => config.initial_infected,
        };
        if initial_count == 0 || initial_count > n {
            return Err(SimError::Config(format!(
                "initial_infected must satisfy 0 < I0 <= {n}, got {initial_count}"
            )));
        }

        let kind = config.model_kind()?;
        let ages = config.age_structure()?;
        let model = DiseaseModel::new(kind, &config.disease_params(&ages)?)?;

        let mut interventions = InterventionManager::new();
        for entry in &config.interventions {
            interventions.push(entry.build()?);
        }
        for extra in self.interventions {
            interventions.push(extra);
        }

        let topology = match &self.network {
            Some(net) => {
                if net.node_count() != n {
                    return Err(SimError::AgentCountMismatch {
                        expected: n,
                        got:      net.node_count(),
                        what:     "contact network nodes",
                    });
                }
                None
            }
            None => Some(Topology::from_name(&config.network.topology, &config.network.params, n)?),
        };

        // ── Build ─────────────────────────────────────────────────────────
        let seed = config.seed.unwrap_or_else(SimRng::fresh_seed);
        let mut rng = SimRng::new(seed);

        let network = match (self.network, topology) {
            (Some(net), _) => net,
            (None, Some(topology)) => topology.generate(n, &mut rng)?,
            (None, None) => ContactNetwork::empty(n),
        };

        let mut population = PopulationBuilder::new(n).build(&ages, &mut rng)?;

        let seeds: Vec<AgentId> = match self.initial_infected {
            Some(ids) => ids,
            None => rng
                .sample_indices(n, initial_count)
                .into_iter()
                .map(|i| AgentId(i as u32))
                .collect(),
        };
        for &id in &seeds {
            population[id].infect(&model, &mut rng);
        }

        info!(
            "built {} engine: {n} agents, {initial_count} initially infected, seed {seed}, \
             {} interventions",
            model.kind(),
            interventions.len()
        );
        info!(
            "contact network: {} edges, mean degree {:.2}",
            network.edge_count(),
            network.mean_degree()
        );

        Ok(Sim {
            contacts: ContactRates::new(ages.base_contacts()),
            history: History::new(&model),
            cumulative: initial_count,
            day: Day::ZERO,
            finished: false,
            config,
            seed,
            model,
            ages,
            network,
            population,
            interventions,
            rng,
        })
    }
}

fn validate_initial_ids(ids: &[AgentId], n: usize) -> SimResult<()> {
    let mut seen = FxHashSet::default();
    for &id in ids {
        if id.index() >= n {
            return Err(SimError::Config(format!(
                "initial infected {id} is outside the population of {n}"
            )));
        }
        if !seen.insert(id) {
            return Err(SimError::Config(format!("initial infected {id} listed twice")));
        }
    }
    Ok(())
}
