//! Simulation observer trait for progress reporting and data collection.

use epi_agent::Population;
use epi_core::Day;

use crate::{DailyRecord, History};

/// Callbacks invoked by [`Sim::run_with`][crate::Sim::run_with] at key
/// points of the day pipeline.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u32 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_day_end(&mut self, record: &DailyRecord) {
///         if record.day.0 % self.interval == 0 {
///             println!("{}: {} new infections", record.day, record.new_infections);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once the day has passed the termination check, before the
    /// exposure scan.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called with the record just appended to the history.
    fn on_day_end(&mut self, _record: &DailyRecord) {}

    /// Called after every recorded day with read-only access to the
    /// population, so writers can dump per-agent state without the engine
    /// knowing about any output format.
    fn on_snapshot(&mut self, _day: Day, _population: &Population) {}

    /// Called once when `run_with` returns.  `finished` is `true` if the
    /// epidemic ended before the requested number of days.
    fn on_sim_end(&mut self, _history: &History, _finished: bool) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
