//! `epi-output` — output writers for epidemic runs.
//!
//! | Backend       | Files created                                     |
//! |---------------|---------------------------------------------------|
//! | [`CsvWriter`] | `daily_counts.csv`, `agent_states.csv` (optional) |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `epi_sim::SimObserver`.  A whole
//! [`History`][epi_sim::History] can also be dumped after the fact with
//! [`write_history`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"), &sim.history().codes(), true)?;
//! let mut obs = SimOutputObserver::new(writer, 7);
//! sim.run_with(180, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentStateRow, DailyCountRow};
pub use writer::{OutputWriter, write_history};
