//! Append-only record of a run.
//!
//! The column layout is fixed once from the model descriptor: `counts[i]`
//! of every [`DailyRecord`] is the number of agents in `states()[i]`.

use serde::Serialize;

use epi_core::Day;
use epi_disease::{Compartment, DiseaseModel};

/// Counts at the end of one simulated day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub day:                   Day,
    /// Agents per state, aligned with [`History::states`].
    pub counts:                Vec<usize>,
    /// Susceptible agents protected by vaccination (included in `S`).
    pub immune:                usize,
    /// Distinct agents infected today.
    pub new_infections:        usize,
    /// Distinct agents ever infected, including the initial cases.
    pub cumulative_infections: usize,
}

impl DailyRecord {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct History {
    states:    Vec<Compartment>,
    records:   Vec<DailyRecord>,
    snapshots: Vec<Vec<Compartment>>,
}

impl History {
    pub fn new(model: &DiseaseModel) -> Self {
        Self {
            states:    model.states().to_vec(),
            records:   Vec::new(),
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: DailyRecord, snapshot: Option<Vec<Compartment>>) {
        debug_assert_eq!(record.counts.len(), self.states.len());
        debug_assert!(
            self.records
                .last()
                .is_none_or(|prev| prev.cumulative_infections <= record.cumulative_infections)
        );
        self.records.push(record);
        if let Some(states) = snapshot {
            self.snapshots.push(states);
        }
    }

    pub fn states(&self) -> &[Compartment] {
        &self.states
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.states.iter().map(|s| s.code()).collect()
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&DailyRecord> {
        self.records.last()
    }

    pub fn get(&self, day: Day) -> Option<&DailyRecord> {
        self.records.get(day.0 as usize)
    }

    /// Daily counts of one state, or `None` if the model lacks it.
    pub fn series(&self, state: Compartment) -> Option<Vec<usize>> {
        let col = self.states.iter().position(|&s| s == state)?;
        Some(self.records.iter().map(|r| r.counts[col]).collect())
    }

    /// [`series`](Self::series) by state code (`"S"`, `"IA"`, …).
    pub fn series_by_code(&self, code: &str) -> Option<Vec<usize>> {
        self.series(Compartment::from_code(code)?)
    }

    pub fn new_infections_series(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.new_infections).collect()
    }

    pub fn cumulative_series(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.cumulative_infections).collect()
    }

    /// Per-agent states per recorded day; empty unless snapshots were enabled.
    pub fn snapshots(&self) -> &[Vec<Compartment>] {
        &self.snapshots
    }

    pub fn snapshot(&self, day: Day) -> Option<&[Compartment]> {
        self.snapshots.get(day.0 as usize).map(Vec::as_slice)
    }
}
