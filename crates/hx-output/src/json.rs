//! JSON run report.
//!
//! Buffers the per-tick metric series in memory and writes them as one
//! `result.json` document on [`finish`][OutputWriter::finish]:
//!
//! ```json
//! {
//!   "num_of_steps": 3,
//!   "mean_target_distance": [9.0, 8.33, 7.67],
//!   "diameter": [1, 1, 1],
//!   "num_of_clusters": [1, 1, 1],
//!   "final_locations": [[0, 3], [1, 3], [0, 4]]
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// The document written to `result.json`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Number of ticks recorded.
    pub num_of_steps:         u64,
    pub mean_target_distance: Vec<f64>,
    pub diameter:             Vec<u32>,
    pub num_of_clusters:      Vec<u32>,
    /// `[row, column]` per agent, in agent order.  Taken from the end of the
    /// run; before that, from the latest snapshot.
    pub final_locations:      Vec<[i32; 2]>,
}

/// Writes a [`RunReport`] to `result.json`.
pub struct JsonSummaryWriter {
    file:   Option<BufWriter<File>>,
    report: RunReport,
}

impl JsonSummaryWriter {
    /// Create `result.json` in `dir`.  Nothing is written until `finish`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let file = File::create(dir.join("result.json"))?;
        Ok(Self {
            file:   Some(BufWriter::new(file)),
            report: RunReport::default(),
        })
    }

    /// The report accumulated so far.
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    fn set_locations(&mut self, rows: &[AgentSnapshotRow]) {
        let mut sorted: Vec<&AgentSnapshotRow> = rows.iter().collect();
        sorted.sort_by_key(|r| r.agent_id);
        self.report.final_locations = sorted.iter().map(|r| [r.row, r.column]).collect();
    }
}

impl OutputWriter for JsonSummaryWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.set_locations(rows);
        Ok(())
    }

    fn write_final_positions(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.set_locations(rows);
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.report.num_of_steps += 1;
        self.report.mean_target_distance.push(row.mean_target_distance);
        self.report.diameter.push(row.diameter);
        self.report.num_of_clusters.push(row.num_clusters);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        serde_json::to_writer_pretty(&mut file, &self.report)?;
        file.flush()?;
        debug!(ticks = self.report.num_of_steps, "result.json written");
        Ok(())
    }
}
