//! Population storage: one `Agent` per contact-network node.

use std::ops::{Index, IndexMut};

use epi_core::AgentId;
use epi_disease::{Compartment, DiseaseModel};

use crate::Agent;

/// All agents of a run, indexed by `AgentId`.
///
/// The length is fixed at construction; agents are never added or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    pub(crate) fn from_agents(agents: Vec<Agent>) -> Self {
        debug_assert!(agents.iter().enumerate().all(|(i, a)| a.id.index() == i));
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    /// Agent count per state, aligned with `model.states()`.
    pub fn count_by_state(&self, model: &DiseaseModel) -> Vec<usize> {
        let mut by_slot = [0usize; Compartment::COUNT];
        for a in &self.agents {
            by_slot[a.state.slot()] += 1;
        }
        model.states().iter().map(|s| by_slot[s.slot()]).collect()
    }

    /// Susceptible agents carrying the vaccination flag.
    pub fn immune_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.immune && a.state == Compartment::Susceptible)
            .count()
    }

    /// `true` while any agent is exposed or infectious.
    pub fn any_active(&self, model: &DiseaseModel) -> bool {
        self.agents.iter().any(|a| a.is_active(model))
    }

    /// Current state of every agent, in id order.
    pub fn states(&self) -> Vec<Compartment> {
        self.agents.iter().map(|a| a.state).collect()
    }
}

impl Index<AgentId> for Population {
    type Output = Agent;

    #[inline]
    fn index(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }
}

impl IndexMut<AgentId> for Population {
    #[inline]
    fn index_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
