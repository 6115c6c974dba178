//! CSV output backend.
//!
//! Creates up to two files in the configured output directory:
//! - `daily_counts.csv`: `day,<state codes…>,immune,new_infections,cumulative_infections`
//! - `agent_states.csv`: `day,agent_id,state,age_group,immune` (only when enabled)

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;
use log::debug;

use crate::writer::OutputWriter;
use crate::{AgentStateRow, DailyCountRow, OutputError, OutputResult};

pub const DAILY_FILE: &str = "daily_counts.csv";
pub const AGENT_FILE: &str = "agent_states.csv";

/// Writes run output to CSV files.
pub struct CsvWriter {
    daily:    Writer<File>,
    agents:   Option<Writer<File>>,
    columns:  usize,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the files and write the header rows.
    ///
    /// `codes` are the model's state codes in column order (see
    /// [`History::codes`][epi_sim::History::codes]).  `agent_states`
    /// controls whether `agent_states.csv` is created at all.
    pub fn new(dir: &Path, codes: &[&str], agent_states: bool) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut daily = Writer::from_path(dir.join(DAILY_FILE))?;
        let mut header = vec!["day"];
        header.extend_from_slice(codes);
        header.extend(["immune", "new_infections", "cumulative_infections"]);
        daily.write_record(&header)?;

        let agents = if agent_states {
            let mut w = Writer::from_path(dir.join(AGENT_FILE))?;
            w.write_record(["day", "agent_id", "state", "age_group", "immune"])?;
            Some(w)
        } else {
            None
        };

        debug!("csv output opened in {}", dir.display());
        Ok(Self {
            daily,
            agents,
            columns: codes.len(),
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_daily(&mut self, row: &DailyCountRow) -> OutputResult<()> {
        if row.counts.len() != self.columns {
            return Err(OutputError::ColumnMismatch { expected: self.columns, got: row.counts.len() });
        }
        let mut record = Vec::with_capacity(self.columns + 4);
        record.push(row.day.to_string());
        record.extend(row.counts.iter().map(usize::to_string));
        record.push(row.immune.to_string());
        record.push(row.new_infections.to_string());
        record.push(row.cumulative_infections.to_string());
        self.daily.write_record(&record)?;
        Ok(())
    }

    fn write_agent_states(&mut self, rows: &[AgentStateRow]) -> OutputResult<()> {
        let Some(agents) = self.agents.as_mut() else {
            return Ok(());
        };
        for row in rows {
            agents.write_record(&[
                row.day.to_string(),
                row.agent_id.to_string(),
                row.state.to_string(),
                row.age_group.to_string(),
                (row.immune as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.daily.flush()?;
        if let Some(agents) = self.agents.as_mut() {
            agents.flush()?;
        }
        Ok(())
    }
}
