//! Tests for epi-output.

use epi_sim::{Sim, SimBuilder, SimConfig};

/// SIR on a complete graph of 20 whose single case never transmits and
/// recovers after exactly five days.
fn quiet_sir() -> Sim {
    let config = SimConfig::from_json_str(
        r#"{
            "model": "SIR",
            "population": 20,
            "initial_infected": 1,
            "seed": 3,
            "transmission": 0.0,
            "infectious": { "mean": 5.0, "std_dev": 0.0 },
            "mortality": 0.0,
            "network": { "topology": "complete" }
        }"#,
    )
    .unwrap();
    SimBuilder::new(config).build().unwrap()
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{AGENT_FILE, CsvWriter, DAILY_FILE};
    use crate::row::{AgentStateRow, DailyCountRow};
    use crate::writer::OutputWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn daily_row(day: u32) -> DailyCountRow {
        DailyCountRow {
            day,
            counts:                vec![7, 2, 1],
            immune:                3,
            new_infections:        1,
            cumulative_infections: 4,
        }
    }

    #[test]
    fn agent_file_only_when_enabled() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path(), &["S", "I", "R"], false).unwrap();
        assert!(dir.path().join(DAILY_FILE).exists());
        assert!(!dir.path().join(AGENT_FILE).exists());

        let dir = tmp();
        let _w = CsvWriter::new(dir.path(), &["S", "I", "R"], true).unwrap();
        assert!(dir.path().join(AGENT_FILE).exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested, &["S"], false).unwrap();
        assert!(nested.join(DAILY_FILE).exists());
    }

    #[test]
    fn headers_follow_state_codes() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["S", "E", "IA", "IS", "R", "D"], true).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join(DAILY_FILE)),
            ["day", "S", "E", "IA", "IS", "R", "D", "immune", "new_infections", "cumulative_infections"]
        );
        assert_eq!(
            headers(dir.path().join(AGENT_FILE)),
            ["day", "agent_id", "state", "age_group", "immune"]
        );
    }

    #[test]
    fn daily_rows_written_in_column_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["S", "I", "R"], false).unwrap();
        w.write_daily(&daily_row(0)).unwrap();
        w.write_daily(&daily_row(1)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(DAILY_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        let first: Vec<&str> = rows[0].iter().collect();
        assert_eq!(first, ["0", "7", "2", "1", "3", "1", "4"]);
        assert_eq!(&rows[1][0], "1");
    }

    #[test]
    fn wrong_column_count_rejected() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["S", "E", "I", "R"], false).unwrap();
        let err = w.write_daily(&daily_row(0)).unwrap_err();
        assert!(matches!(err, OutputError::ColumnMismatch { expected: 4, got: 3 }));
    }

    #[test]
    fn agent_rows_encode_immune_as_integer() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["S", "I", "R"], true).unwrap();
        w.write_agent_states(&[
            AgentStateRow { day: 2, agent_id: 0, state: "S", age_group: 1, immune: true },
            AgentStateRow { day: 2, agent_id: 1, state: "I", age_group: 0, immune: false },
        ])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(AGENT_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        let first: Vec<&str> = rows[0].iter().collect();
        assert_eq!(first, ["2", "0", "S", "1", "1"]);
        assert_eq!(&rows[1][4], "0");
    }

    #[test]
    fn agent_rows_ignored_when_disabled() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["S"], false).unwrap();
        w.write_agent_states(&[AgentStateRow {
            day: 0, agent_id: 0, state: "S", age_group: 0, immune: false,
        }])
        .unwrap();
        assert!(!dir.path().join(AGENT_FILE).exists());
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["S"], true).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use tempfile::TempDir;

    use crate::csv::{AGENT_FILE, CsvWriter, DAILY_FILE};
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentStateRow, DailyCountRow};
    use crate::writer::{OutputWriter, write_history};
    use crate::{OutputError, OutputResult};

    use super::quiet_sir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row_count(path: std::path::PathBuf) -> usize {
        csv::Reader::from_path(path).unwrap().records().count()
    }

    #[test]
    fn streams_every_recorded_day() {
        let mut sim = quiet_sir();
        let dir = tmp();
        let writer = CsvWriter::new(dir.path(), &sim.history().codes(), true).unwrap();
        let mut obs = SimOutputObserver::new(writer, 2);
        sim.run_with(30, &mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        let recorded = sim.history().len();
        assert!(recorded > 0 && recorded < 30, "the quiet case ends early");
        assert_eq!(row_count(dir.path().join(DAILY_FILE)), recorded);

        let snapshot_days = sim.history().records().iter().filter(|r| r.day.0 % 2 == 0).count();
        assert_eq!(row_count(dir.path().join(AGENT_FILE)), snapshot_days * 20);
    }

    #[test]
    fn zero_interval_writes_no_agent_rows() {
        let mut sim = quiet_sir();
        let dir = tmp();
        let writer = CsvWriter::new(dir.path(), &sim.history().codes(), true).unwrap();
        let mut obs = SimOutputObserver::new(writer, 0);
        sim.run_with(10, &mut obs);
        assert!(obs.take_error().is_none());
        assert_eq!(row_count(dir.path().join(AGENT_FILE)), 0);
    }

    #[test]
    fn streamed_and_dumped_output_match() {
        let mut streamed = quiet_sir();
        let a = tmp();
        let writer = CsvWriter::new(a.path(), &streamed.history().codes(), false).unwrap();
        let mut obs = SimOutputObserver::new(writer, 0);
        streamed.run_with(30, &mut obs);

        let mut dumped = quiet_sir();
        dumped.run(30);
        let b = tmp();
        let mut writer = CsvWriter::new(b.path(), &dumped.history().codes(), false).unwrap();
        write_history(&mut writer, dumped.history()).unwrap();

        let first = std::fs::read_to_string(a.path().join(DAILY_FILE)).unwrap();
        let second = std::fs::read_to_string(b.path().join(DAILY_FILE)).unwrap();
        assert_eq!(first, second);
    }

    /// Fails every daily write, counting attempts.
    struct Broken {
        attempts: usize,
    }

    impl OutputWriter for Broken {
        fn write_daily(&mut self, _row: &DailyCountRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(io::Error::other(format!("disk full #{}", self.attempts))))
        }

        fn write_agent_states(&mut self, _rows: &[AgentStateRow]) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_and_keeps_running() {
        let mut sim = quiet_sir();
        let mut obs = SimOutputObserver::new(Broken { attempts: 0 }, 0);
        sim.run_with(3, &mut obs);

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("disk full #1"), "got {err}");
        assert!(obs.take_error().is_none(), "take_error clears the slot");
        assert_eq!(obs.into_writer().attempts, 3);
    }
}
