//! small_world — SEIAR-D outbreak on a Watts-Strogatz contact network.
//!
//! Runs the embedded scenario (or a JSON config given as the first
//! argument), streams `daily_counts.csv` and weekly `agent_states.csv` to
//! `output/small_world/`, and prints a per-week summary.  Set `RUST_LOG=debug`
//! for the per-day pipeline log.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use epi_agent::Population;
use epi_core::Day;
use epi_output::{CsvWriter, OutputWriter, SimOutputObserver};
use epi_sim::{DailyRecord, History, SimBuilder, SimConfig, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_DAYS:          u32  = 180;
const SNAPSHOT_INTERVAL: u32  = 7; // agent states once a week
const OUTPUT_DIR:        &str = "output/small_world";

// 5 000 agents in three age bands; lockdown, masks and a vaccination drive
// overlap in the first two months.
const SCENARIO_JSON: &str = r#"{
    "model": "SEIAR-D",
    "population": 5000,
    "initial_infected": 10,
    "seed": 42,
    "transmission": { "symptomatic": 0.06, "asymptomatic": 0.03 },
    "p_symptomatic": 0.6,
    "incubation":   { "mean": 4.0, "std_dev": 1.5 },
    "infectious":   { "mean": 8.0, "std_dev": 2.0 },
    "asymptomatic": { "mean": 6.0, "std_dev": 2.0 },
    "mortality": { "child": 0.001, "adult": 0.01, "senior": 0.08 },
    "age_groups": {
        "distribution":     { "child": 0.2, "adult": 0.6, "senior": 0.2 },
        "susceptibility":   { "child": 0.6, "adult": 1.0, "senior": 1.3 },
        "contacts_per_day": { "child": 14,  "adult": 10,  "senior": 6 }
    },
    "network": {
        "topology": "watts_strogatz",
        "params": { "mean_degree": 12, "rewire_probability": 0.1 }
    },
    "interventions": [
        { "kind": "lockdown", "start_day": 20, "end_day": 50, "reduction_factor": 0.4 },
        { "kind": "masks", "start_day": 15, "end_day": 90, "compliance": 0.7, "efficacy": 0.5 },
        { "kind": "vaccination", "start_day": 30, "end_day": 120,
          "daily_rate": 0.01, "compliance": 0.8, "efficacy": 0.9 }
    ]
}"#;

// ── Observer wrapper tracking the peak ───────────────────────────────────────

struct PeakObserver<W: OutputWriter> {
    inner:      SimOutputObserver<W>,
    /// Which `DailyRecord::counts` columns are infectious states.
    infectious: Vec<bool>,
    peak:       (Day, usize),
    days:       usize,
}

impl<W: OutputWriter> PeakObserver<W> {
    fn new(inner: SimOutputObserver<W>, infectious: Vec<bool>) -> Self {
        Self { inner, infectious, peak: (Day::ZERO, 0), days: 0 }
    }
}

impl<W: OutputWriter> SimObserver for PeakObserver<W> {
    fn on_day_end(&mut self, record: &DailyRecord) {
        let infectious: usize = record
            .counts
            .iter()
            .zip(&self.infectious)
            .filter_map(|(&count, &is_inf)| is_inf.then_some(count))
            .sum();
        if infectious > self.peak.1 {
            self.peak = (record.day, infectious);
        }
        self.days += 1;
        self.inner.on_day_end(record);
    }

    fn on_snapshot(&mut self, day: Day, population: &Population) {
        self.inner.on_snapshot(day, population);
    }

    fn on_sim_end(&mut self, history: &History, finished: bool) {
        self.inner.on_sim_end(history, finished);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_json_path(&path).with_context(|| format!("loading {path}"))?,
        None => SimConfig::from_json_str(SCENARIO_JSON).context("parsing embedded scenario")?,
    };

    println!("=== small_world — network epidemic engine ===");
    println!(
        "Model: {}  |  Agents: {}  |  I0: {}  |  Days: {SIM_DAYS}",
        config.model, config.population, config.initial_infected
    );
    println!();

    // 1. Build the engine: network, age groups, initial cases.
    let mut sim = SimBuilder::new(config).build()?;
    println!(
        "Contact network: {} nodes, {} edges, mean degree {:.2}",
        sim.network().node_count(),
        sim.network().edge_count(),
        sim.network().mean_degree()
    );
    let groups: Vec<&str> = sim.ages().groups().iter().map(|g| g.name.as_str()).collect();
    println!("Age groups: {}", groups.join(", "));
    println!("Interventions: {}", sim.interventions().names().join(", "));
    println!("Seed: {}", sim.seed());
    println!();

    // 2. Set up output.
    let codes = sim.history().codes();
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR), &codes, true)?;
    let infectious = sim.history().states().iter().map(|&s| sim.model().is_infectious(s)).collect();
    let mut obs = PeakObserver::new(SimOutputObserver::new(writer, SNAPSHOT_INTERVAL), infectious);

    // 3. Run.
    let t0 = Instant::now();
    sim.run_with(SIM_DAYS, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    info!("wrote {} daily rows to {OUTPUT_DIR}", obs.days);

    // 4. Weekly table.
    let history = sim.history();
    println!("Simulation complete in {:.3} s ({} days recorded)", elapsed.as_secs_f64(), history.len());
    println!();

    print!("{:<6}", "Day");
    for code in &codes {
        print!("{code:>7}");
    }
    println!("{:>8} {:>8}", "immune", "cumul");
    println!("{}", "-".repeat(6 + 7 * codes.len() + 18));
    for record in history.records().iter().filter(|r| r.day.0 % 7 == 0) {
        print!("{:<6}", record.day.0);
        for count in &record.counts {
            print!("{count:>7}");
        }
        println!("{:>8} {:>8}", record.immune, record.cumulative_infections);
    }
    println!();

    // 5. Summary.
    let (peak_day, peak) = obs.peak;
    println!("Peak infectious : {peak} on {peak_day}");
    println!("Total infected  : {}", sim.cumulative_infections());
    if let Some(dead) = history.series_by_code("D") {
        println!("Deaths          : {}", dead.last().copied().unwrap_or(0));
    }
    println!(
        "Outcome         : {}",
        if sim.is_finished() { "epidemic died out" } else { "still active at end of run" }
    );

    Ok(())
}
