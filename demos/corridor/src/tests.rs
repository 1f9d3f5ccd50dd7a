//! Tests for the corridor demo's progress observer.

use super::*;

use hx_output::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Accepts every write and keeps nothing.
struct NullWriter;

impl OutputWriter for NullWriter {
    fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        Ok(())
    }

    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;

    #[test]
    fn clusters_survive_a_reset_on_the_final_tick() {
        // recluster_interval_ticks = 10, so tick 9 ends an epoch.
        let mut scenario = Scenario::from_reader(CORRIDOR_JSON.as_bytes()).unwrap();
        scenario.num_of_steps = 10;
        let mut sim = scenario.build_sim().unwrap();
        let mut obs = ProgressObserver::new(SimOutputObserver::new(NullWriter));
        sim.run(&mut obs).unwrap();

        assert!(sim.agents.iter().all(|a| !a.is_cluster_defined()));
        let (tick, agents) = obs.last_snapshot.as_ref().expect("snapshot taken");
        assert_eq!(*tick, Tick(9));
        assert_eq!(agents.len(), sim.agents.len());
        for i in 0..sim.agents.len() {
            assert_ne!(obs.cluster_label(i), "-", "agent {i} lost its cluster");
        }
    }

    #[test]
    fn no_snapshot_means_no_cluster() {
        let obs = ProgressObserver::new(SimOutputObserver::new(NullWriter));
        assert_eq!(obs.cluster_label(0), "-");
    }
}
