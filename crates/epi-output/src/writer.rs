//! The `OutputWriter` trait implemented by all backend writers.

use epi_sim::History;

use crate::{DailyCountRow, OutputResult};

/// Trait implemented by output backends.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver] errors are
/// stored and retrieved with
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one day of the time series.
    fn write_daily(&mut self, row: &DailyCountRow) -> OutputResult<()>;

    /// Write a batch of per-agent states.
    fn write_agent_states(&mut self, rows: &[crate::AgentStateRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every record of a finished run, then `finish` the writer.
pub fn write_history<W: OutputWriter>(writer: &mut W, history: &History) -> OutputResult<()> {
    for record in history.records() {
        writer.write_daily(&DailyCountRow::from(record))?;
    }
    writer.finish()
}
