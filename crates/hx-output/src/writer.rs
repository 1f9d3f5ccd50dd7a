//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and JSON writers.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Record every agent's position after the last tick.  Writers that only
    /// stream snapshots can ignore it.
    fn write_final_positions(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Fan out to two writers.  Both always receive every call; the first error
/// is returned.
impl<A: OutputWriter, B: OutputWriter> OutputWriter for (A, B) {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        let first = self.0.write_snapshots(rows);
        let second = self.1.write_snapshots(rows);
        first.and(second)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let first = self.0.write_tick_summary(row);
        let second = self.1.write_tick_summary(row);
        first.and(second)
    }

    fn write_final_positions(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        let first = self.0.write_final_positions(rows);
        let second = self.1.write_final_positions(rows);
        first.and(second)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let first = self.0.finish();
        let second = self.1.finish();
        first.and(second)
    }
}
