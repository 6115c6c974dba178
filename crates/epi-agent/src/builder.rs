//! Fluent builder for a [`Population`].
//!
//! # Usage
//!
//! ```rust
//! use epi_agent::{AgeStructure, PopulationBuilder};
//! use epi_core::SimRng;
//!
//! let ages = AgeStructure::single(10);
//! let mut rng = SimRng::new(42);
//! let pop = PopulationBuilder::new(1_000).build(&ages, &mut rng).unwrap();
//!
//! assert_eq!(pop.len(), 1_000);
//! assert!(pop.iter().all(|a| !a.immune && a.mask_efficacy == 0.0));
//! ```

use epi_core::{AgeGroupId, AgentId, EpiError, EpiResult, SimRng};

use crate::{Agent, AgeStructure, Population};

/// Builds `count` susceptible agents with age groups drawn from an
/// [`AgeStructure`] (or supplied explicitly).
pub struct PopulationBuilder {
    count:      usize,
    age_groups: Option<Vec<AgeGroupId>>,
}

impl PopulationBuilder {
    pub fn new(count: usize) -> Self {
        Self { count, age_groups: None }
    }

    /// Use these age groups instead of drawing them.  Must be length `count`.
    pub fn age_groups(mut self, groups: Vec<AgeGroupId>) -> Self {
        self.age_groups = Some(groups);
        self
    }

    pub fn build(self, ages: &AgeStructure, rng: &mut SimRng) -> EpiResult<Population> {
        if self.count > u32::MAX as usize {
            return Err(EpiError::Config(format!("population {} is too large", self.count)));
        }
        let groups = match self.age_groups {
            Some(groups) => {
                if groups.len() != self.count {
                    return Err(EpiError::Config(format!(
                        "{} age groups supplied for {} agents",
                        groups.len(),
                        self.count
                    )));
                }
                if let Some(bad) = groups.iter().find(|g| g.index() >= ages.len()) {
                    return Err(EpiError::Config(format!("unknown age group {bad}")));
                }
                groups
            }
            None => ages.assign(self.count, rng)?,
        };

        let agents = groups
            .into_iter()
            .enumerate()
            .map(|(i, g)| Agent::new(AgentId(i as u32), g))
            .collect();
        Ok(Population::from_agents(agents))
    }
}
