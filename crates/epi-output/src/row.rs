//! Plain data row types written by output backends.

use epi_agent::Agent;
use epi_core::Day;
use epi_sim::DailyRecord;

/// One line of the daily time series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCountRow {
    pub day:                   u32,
    /// Agents per state, in the model's state order.
    pub counts:                Vec<usize>,
    pub immune:                usize,
    pub new_infections:        usize,
    pub cumulative_infections: usize,
}

impl From<&DailyRecord> for DailyCountRow {
    fn from(record: &DailyRecord) -> Self {
        Self {
            day:                   record.day.0,
            counts:                record.counts.clone(),
            immune:                record.immune,
            new_infections:        record.new_infections,
            cumulative_infections: record.cumulative_infections,
        }
    }
}

/// One agent's disease state on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentStateRow {
    pub day:       u32,
    pub agent_id:  u32,
    /// Short compartment code (`"S"`, `"IA"`, …).
    pub state:     &'static str,
    pub age_group: u8,
    pub immune:    bool,
}

impl AgentStateRow {
    pub fn new(day: Day, agent: &Agent) -> Self {
        Self {
            day:       day.0,
            agent_id:  agent.id.index() as u32,
            state:     agent.state.code(),
            age_group: agent.age_group.index() as u8,
            immune:    agent.immune,
        }
    }
}
