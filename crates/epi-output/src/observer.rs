//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use epi_agent::Population;
use epi_core::Day;
use epi_sim::{DailyRecord, History, SimObserver};

use crate::row::{AgentStateRow, DailyCountRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams daily counts and periodic agent-state
/// snapshots to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run_with()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    /// Dump agent states every this many days; `0` disables snapshots.
    snapshot_interval: u32,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, snapshot_interval: u32) -> Self {
        Self {
            writer,
            snapshot_interval,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_day_end(&mut self, record: &DailyRecord) {
        let result = self.writer.write_daily(&DailyCountRow::from(record));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, day: Day, population: &Population) {
        if self.snapshot_interval == 0 || day.0 % self.snapshot_interval != 0 {
            return;
        }
        let rows: Vec<AgentStateRow> =
            population.iter().map(|agent| AgentStateRow::new(day, agent)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_agent_states(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _history: &History, _finished: bool) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
