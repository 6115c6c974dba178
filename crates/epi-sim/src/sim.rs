//! The `Sim` struct and its day pipeline.

use log::{debug, info};
use rustc_hash::FxHashSet;

use epi_agent::{AgeStructure, Population};
use epi_core::{AgentId, Day, SimRng};
use epi_disease::DiseaseModel;
use epi_intervention::{ContactRates, InterventionContext, InterventionManager};
use epi_network::ContactNetwork;

use crate::{DailyRecord, History, NoopObserver, SimConfig, SimObserver};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The epidemic engine.
///
/// `Sim` owns every piece of run state and drives the day pipeline:
///
/// 0. **Interventions**: every registered policy, in registration order.
/// 1. **Termination check**: stop for good if nobody is exposed or infectious.
/// 2. **Exposure scan** (read-only): each infectious agent samples its
///    contacts from its network neighbours and collects exposure candidates.
/// 3. **Apply**: infect the candidates; duplicates and agents that stopped
///    being exposable are no-ops.
/// 4. **Progress**: advance every timer except those armed today.
/// 5. **Record**: append the day's counts to the [`History`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:        SimConfig,
    pub(crate) seed:          u64,
    pub(crate) model:         DiseaseModel,
    pub(crate) ages:          AgeStructure,
    pub(crate) network:       ContactNetwork,
    pub(crate) population:    Population,
    pub(crate) contacts:      ContactRates,
    pub(crate) interventions: InterventionManager,
    pub(crate) rng:           SimRng,
    pub(crate) day:           Day,
    pub(crate) history:       History,
    pub(crate) cumulative:    usize,
    pub(crate) finished:      bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Simulate up to `days` days, stopping early if the epidemic ends.
    pub fn run(&mut self, days: u32) {
        self.run_with(days, &mut NoopObserver);
    }

    /// [`run`](Self::run) with observer callbacks.
    pub fn run_with<O: SimObserver>(&mut self, days: u32, observer: &mut O) {
        let before = self.history.len();
        for _ in 0..days {
            if !self.step_with(observer) {
                break;
            }
        }
        info!(
            "run complete: {} new days recorded ({} total), finished = {}",
            self.history.len() - before,
            self.history.len(),
            self.finished
        );
        observer.on_sim_end(&self.history, self.finished);
    }

    /// Simulate one day.  Returns `false` (and changes nothing) once the run
    /// has finished; the day that detects termination records nothing.
    pub fn step(&mut self) -> bool {
        self.step_with(&mut NoopObserver)
    }

    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> bool {
        if self.finished {
            return false;
        }
        let today = self.day;

        // ── Phase 0: interventions ────────────────────────────────────────
        let mut ctx = InterventionContext {
            day:        today,
            contacts:   &mut self.contacts,
            population: &mut self.population,
            model:      &self.model,
            rng:        &mut self.rng,
        };
        self.interventions.apply_all(&mut ctx);

        // ── Phase 0.5: termination check ──────────────────────────────────
        if !self.population.any_active(&self.model) {
            self.finished = true;
            info!("epidemic over at {today}: no exposed or infectious agents remain");
            return false;
        }
        observer.on_day_start(today);

        // ── Phase 1: exposure scan (read-only) ────────────────────────────
        let candidates = collect_exposures(
            &self.population,
            &self.network,
            &self.model,
            &self.ages,
            &self.contacts,
            &mut self.rng,
        );

        // ── Phase 2: batch infection ──────────────────────────────────────
        //
        // `infect` re-checks exposability, so a target listed twice (or
        // vaccinated before the scan) is only infected once.
        let mut infected_today: FxHashSet<AgentId> = FxHashSet::default();
        for &target in &candidates {
            if self.population[target].infect(&self.model, &mut self.rng) {
                infected_today.insert(target);
            }
        }

        // ── Phase 3: progression ──────────────────────────────────────────
        for agent in self.population.iter_mut() {
            if !infected_today.contains(&agent.id) {
                agent.progress(&self.model, &mut self.rng);
            }
        }

        // ── Phase 4: record ───────────────────────────────────────────────
        let new_infections = infected_today.len();
        self.cumulative += new_infections;

        let counts = self.population.count_by_state(&self.model);
        let total: usize = counts.iter().sum();
        assert_eq!(
            total,
            self.population.len(),
            "population drift on {today}: per-state counts {counts:?} sum to {total}"
        );

        let record = DailyRecord {
            day: today,
            counts,
            immune: self.population.immune_count(),
            new_infections,
            cumulative_infections: self.cumulative,
        };
        debug!(
            "{today}: {} candidates, {new_infections} new infections, counts {:?}",
            candidates.len(),
            record.counts
        );
        let snapshot = self.config.record_snapshots.then(|| self.population.states());

        observer.on_day_end(&record);
        observer.on_snapshot(today, &self.population);

        self.history.push(record, snapshot);
        self.day = today.next();
        true
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The seed the run was started from (drawn from entropy if the
    /// configuration had none).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The next day to be simulated.
    pub fn day(&self) -> Day {
        self.day
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn model(&self) -> &DiseaseModel {
        &self.model
    }

    pub fn ages(&self) -> &AgeStructure {
        &self.ages
    }

    pub fn network(&self) -> &ContactNetwork {
        &self.network
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn interventions(&self) -> &InterventionManager {
        &self.interventions
    }

    pub fn contacts(&self) -> &ContactRates {
        &self.contacts
    }

    pub fn cumulative_infections(&self) -> usize {
        self.cumulative
    }

    // ── Between-day writes ────────────────────────────────────────────────
    //
    // The same fields interventions may write.  Anything else is owned by
    // the pipeline.

    pub fn contacts_mut(&mut self) -> &mut ContactRates {
        &mut self.contacts
    }

    /// Set one agent's mask efficacy.  Returns `false` for an unknown id.
    pub fn set_mask_efficacy(&mut self, agent: AgentId, efficacy: f64) -> bool {
        match self.population.get_mut(agent) {
            Some(a) => {
                a.mask_efficacy = efficacy.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Mark one agent immune.  Returns `false` for an unknown id.
    pub fn set_immune(&mut self, agent: AgentId) -> bool {
        match self.population.get_mut(agent) {
            Some(a) => {
                a.immune = true;
                true
            }
            None => false,
        }
    }
}

// ── Exposure scan ─────────────────────────────────────────────────────────────

/// Phase 1.  Reads a fixed population snapshot and returns the ids of
/// successfully exposed targets, duplicates included, in scan order.
///
/// Each infectious source draws `contacts[group]` neighbours with
/// replacement; an exposable target is exposed with probability
/// `rate(source state) × susceptibility(target group) × (1 − source mask)`.
fn collect_exposures(
    population: &Population,
    network:    &ContactNetwork,
    model:      &DiseaseModel,
    ages:       &AgeStructure,
    contacts:   &ContactRates,
    rng:        &mut SimRng,
) -> Vec<AgentId> {
    let mut candidates = Vec::new();
    for source in population {
        if !source.is_infectious(model) {
            continue;
        }
        let neighbors = network.neighbors(source.id);
        if neighbors.is_empty() {
            continue;
        }
        let source_rate = model.transmission_rate(source.state) * (1.0 - source.mask_efficacy);
        for _ in 0..contacts.get(source.age_group) {
            let Some(&target_id) = rng.choose(neighbors) else {
                break;
            };
            let target = &population[target_id];
            if !target.is_exposable(model) {
                continue;
            }
            if rng.gen_bool(source_rate * ages.susceptibility(target.age_group)) {
                candidates.push(target_id);
            }
        }
    }
    candidates
}
