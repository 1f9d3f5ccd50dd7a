//! Integration tests for hx-sim.

use std::collections::HashSet;
use std::sync::Arc;

use hx_behavior::{AgentBehavior, AgentMessage, ClusterConsensus};
use hx_cluster::{ClusterAssigner, RadiusLinkage};
use hx_core::{AgentId, ClusterId, HexCoord, SimConfig, Tick, WallSet};

use crate::arbitration::{MovePlan, arbitrate};
use crate::{ClusteringMethod, NoopObserver, Scenario, SimBuilder, SimError, SimObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn hx(row: i32, column: i32) -> HexCoord {
    HexCoord::new(row, column)
}

fn test_config(total_ticks: u64, recluster_interval_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed: 42,
        recluster_interval_ticks,
        penalty_steps: 2,
        output_interval_ticks: 1,
    }
}

fn agents_at(starts: &[HexCoord], target: HexCoord, walls: &Arc<WallSet>) -> Vec<ClusterConsensus> {
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            ClusterConsensus::new(AgentId(i as u32), start, target, 3, Arc::clone(walls)).unwrap()
        })
        .collect()
}

/// Three agents packed around the origin.
fn tight_group() -> Vec<HexCoord> {
    vec![hx(0, 0), hx(1, 0), hx(0, 1)]
}

fn message(id: u32, location: HexCoord, cluster: Option<u32>) -> AgentMessage {
    AgentMessage {
        agent_id:        AgentId(id),
        location,
        next_move:       HexCoord::ZERO,
        cluster_id:      ClusterId(cluster.unwrap_or(0)),
        cluster_defined: cluster.is_some(),
        confidence:      0.0,
    }
}

/// Records every observer callback.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    summaries: Vec<TickSummary>,
    snapshots: Vec<(Tick, Vec<AgentMessage>)>,
    ended:     Option<(Tick, Vec<AgentMessage>)>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(*summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentMessage]) {
        self.snapshots.push((tick, agents.to_vec()));
    }

    fn on_sim_end(&mut self, final_tick: Tick, agents: &[AgentMessage]) {
        self.ended = Some((final_tick, agents.to_vec()));
    }
}

const CORRIDOR_JSON: &str = r#"{
    "num_of_steps": 60,
    "target_location": [2, 8],
    "wall_locations": [[-2, 4], [-1, 4], [0, 4], [1, 4], [2, 4], [4, 4], [5, 4]],
    "agent_locations": [[0, 0], [1, 0], [0, 1], [1, 1], [2, 0]],
    "seed": 11,
    "recluster_interval_ticks": 5
}"#;

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let walls = Arc::new(WallSet::empty());
        let sim = SimBuilder::new(
            test_config(10, 0),
            agents_at(&tight_group(), hx(5, 5), &walls),
            RadiusLinkage::new(3),
            hx(5, 5),
        )
        .build()
        .unwrap();
        assert_eq!(sim.agents.len(), 3);
        assert_eq!(sim.rngs.len(), 3);
        assert_eq!(sim.current_tick, Tick::ZERO);
        assert!(sim.walls.is_empty());
    }

    #[test]
    fn id_mismatch_errors() {
        let walls = Arc::new(WallSet::empty());
        let mut agents = agents_at(&tight_group(), hx(5, 5), &walls);
        agents.swap(0, 1);
        let result =
            SimBuilder::new(test_config(10, 0), agents, RadiusLinkage::new(3), hx(5, 5)).build();
        assert!(matches!(result, Err(SimError::AgentIdMismatch { index: 0, .. })));
    }

    #[test]
    fn shared_start_errors() {
        let walls = Arc::new(WallSet::empty());
        let agents = agents_at(&[hx(0, 0), hx(2, 2), hx(0, 0)], hx(5, 5), &walls);
        let result =
            SimBuilder::new(test_config(10, 0), agents, RadiusLinkage::new(3), hx(5, 5)).build();
        match result {
            Err(SimError::SharedStart { first, second, cell }) => {
                assert_eq!(first, AgentId(0));
                assert_eq!(second, AgentId(2));
                assert_eq!(cell, hx(0, 0));
            }
            other => panic!("expected SharedStart, got {:?}", other.err()),
        }
    }

    #[test]
    fn start_on_wall_errors() {
        let walls: Arc<WallSet> = Arc::new([hx(1, 0)].into_iter().collect());
        let agents = agents_at(&tight_group(), hx(5, 5), &walls);
        let result = SimBuilder::new(test_config(10, 0), agents, RadiusLinkage::new(3), hx(5, 5))
            .walls(walls)
            .build();
        assert!(matches!(result, Err(SimError::StartOnWall { agent: AgentId(1), .. })));
    }

    #[test]
    fn target_on_wall_errors() {
        let walls: Arc<WallSet> = Arc::new([hx(5, 5)].into_iter().collect());
        let agents = agents_at(&tight_group(), hx(5, 5), &walls);
        let result = SimBuilder::new(test_config(10, 0), agents, RadiusLinkage::new(3), hx(5, 5))
            .walls(walls)
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    fn tight_group_sim(
        total_ticks: u64,
        recluster_interval_ticks: u64,
    ) -> crate::Sim<ClusterConsensus, RadiusLinkage> {
        let walls = Arc::new(WallSet::empty());
        SimBuilder::new(
            test_config(total_ticks, recluster_interval_ticks),
            agents_at(&tight_group(), hx(5, 5), &walls),
            RadiusLinkage::new(3),
            hx(5, 5),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn run_reaches_end_tick_and_notifies_observer() {
        let mut sim = tight_group_sim(7, 0);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.current_tick, Tick(7));
        assert_eq!(rec.starts, (0..7).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.summaries.len(), 7);
        assert_eq!(rec.snapshots.len(), 7);
        let (final_tick, agents) = rec.ended.expect("on_sim_end called");
        assert_eq!(final_tick, Tick(7));
        assert_eq!(agents, sim.messages());
    }

    #[test]
    fn sim_end_reports_positions_past_the_last_snapshot() {
        let mut sim = tight_group_sim(6, 0);
        sim.config.output_interval_ticks = 4;
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let (last_tick, last_snapshot) = rec.snapshots.last().expect("snapshot at tick 4");
        assert_eq!(*last_tick, Tick(4));
        let (_, agents) = rec.ended.expect("on_sim_end called");
        let ended_at: Vec<HexCoord> = agents.iter().map(|m| m.location).collect();
        assert_eq!(ended_at, sim.positions());
        assert_ne!(
            ended_at,
            last_snapshot.iter().map(|m| m.location).collect::<Vec<_>>()
        );
    }

    #[test]
    fn zero_ticks_is_a_no_op() {
        let mut sim = tight_group_sim(0, 0);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.current_tick, Tick::ZERO);
        assert!(rec.summaries.is_empty());
        assert_eq!(sim.positions(), tight_group());
    }

    #[test]
    fn snapshot_interval_is_respected() {
        let mut sim = tight_group_sim(10, 0);
        sim.config.output_interval_ticks = 4;
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ticks: Vec<Tick> = rec.snapshots.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(4), Tick(8)]);
        assert!(rec.snapshots.iter().all(|(_, agents)| agents.len() == 3));
    }

    #[test]
    fn first_tick_translates_the_group() {
        // Centroid (0,0), target (5,5): every member steps along (0,1).
        let mut sim = tight_group_sim(10, 0);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.positions(), vec![hx(0, 1), hx(1, 1), hx(0, 2)]);
        assert!(sim.agents.iter().all(|a| a.is_cluster_defined()));
        assert!(sim.agents.iter().all(|a| a.cluster_center() == hx(0, 0)));
    }

    #[test]
    fn group_reaches_target_when_reclustering_every_tick() {
        let mut sim = tight_group_sim(40, 1);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let first = rec.summaries[0].mean_target_distance;
        let best = rec
            .summaries
            .iter()
            .map(|s| s.mean_target_distance)
            .fold(f64::INFINITY, f64::min);
        assert!(first > 8.0);
        assert!(best <= 1.0, "closest approach was {best}");
        assert!(rec.summaries.iter().any(|s| s.agents_at_target == 1));
    }

    #[test]
    fn recovery_confidence_reaches_cluster_mates_in_the_same_tick() {
        // Agent 0 at (0,0) heads east into the wall at (0,1); with (1,0)
        // walled too, recovery picks (-1,1) at 60° and raises confidence.
        // Agent 1 at (-1,0), one cell away, intends (0,1) at 0° and blends:
        // (0 + (0 - 60) / 0.7) / 2 = -42.86° → 300°, i.e. (1,0).
        let target = hx(0, 10);
        let walls: Arc<WallSet> = Arc::new([hx(0, 1), hx(1, 0)].into_iter().collect());
        let starts = [hx(0, 0), hx(-1, 0)];
        let mut sim = SimBuilder::new(
            test_config(1, 0),
            agents_at(&starts, target, &walls),
            RadiusLinkage::new(3),
            target,
        )
        .walls(walls)
        .build()
        .unwrap();

        let uncorrected = hx(-1, 0).compute_move(target - hx(0, 0) + hx(-1, 0));
        assert_eq!(uncorrected, hx(0, 1));

        sim.run_ticks(1, &mut NoopObserver).unwrap();

        assert_eq!(sim.agents[0].cluster_center(), hx(0, 0));
        assert_eq!(sim.agents[0].location(), hx(-1, 1));
        assert_eq!(sim.agents[1].next_move(), hx(1, 0));
        assert_eq!(sim.agents[1].location(), hx(0, 0));
        assert_ne!(sim.agents[1].location(), hx(-1, 0) + uncorrected);
    }

    #[test]
    fn epoch_reset_refreshes_centroids() {
        let mut frozen = tight_group_sim(10, 0);
        frozen.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(frozen.agents.iter().all(|a| a.cluster_center() == hx(0, 0)));

        let mut refreshed = tight_group_sim(10, 1);
        refreshed.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(refreshed.agents.iter().all(|a| !a.is_cluster_defined()));
        assert!(refreshed.agents.iter().all(|a| a.cluster_center() == a.location()));
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = tight_group_sim(2, 0);
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick, Tick(5));
    }
}

// ── Arbitration ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod arbitration_tests {
    use super::*;

    fn plan(from: HexCoord, step: HexCoord) -> MovePlan {
        MovePlan { from, step }
    }

    #[test]
    fn free_moves_are_accepted() {
        let plans = [plan(hx(0, 0), hx(0, 1)), plan(hx(3, 3), hx(1, 0))];
        assert!(arbitrate(&plans, &WallSet::empty()).is_empty());
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let walls: WallSet = [hx(0, 1)].into_iter().collect();
        let plans = [plan(hx(0, 0), hx(0, 1)), plan(hx(3, 3), HexCoord::ZERO)];
        assert_eq!(arbitrate(&plans, &walls), vec![0]);
    }

    #[test]
    fn contested_cell_goes_to_lower_index() {
        let plans = [plan(hx(0, 0), hx(0, 1)), plan(hx(0, 2), hx(0, -1))];
        assert_eq!(arbitrate(&plans, &WallSet::empty()), vec![1]);
    }

    #[test]
    fn stationary_agent_holds_its_cell() {
        let plans = [plan(hx(0, 0), hx(0, 1)), plan(hx(0, 1), HexCoord::ZERO)];
        assert_eq!(arbitrate(&plans, &WallSet::empty()), vec![0]);
    }

    #[test]
    fn following_into_a_vacated_cell_is_allowed() {
        let plans = [plan(hx(0, 0), hx(0, 1)), plan(hx(0, 1), hx(0, 1))];
        assert!(arbitrate(&plans, &WallSet::empty()).is_empty());
    }

    #[test]
    fn rejection_cascades_back_along_a_chain() {
        let plans = [
            plan(hx(0, 0), hx(0, 1)),
            plan(hx(0, 1), hx(0, 1)),
            plan(hx(0, 2), HexCoord::ZERO),
        ];
        assert_eq!(arbitrate(&plans, &WallSet::empty()), vec![0, 1]);
    }

    #[test]
    fn swap_is_allowed() {
        let plans = [plan(hx(0, 0), hx(0, 1)), plan(hx(0, 1), hx(0, -1))];
        assert!(arbitrate(&plans, &WallSet::empty()).is_empty());
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;

    #[test]
    fn measures_distance_diameter_and_clusters() {
        let agents = [
            message(0, hx(5, 5), Some(1)),
            message(1, hx(5, 7), Some(1)),
            message(2, hx(2, 5), Some(2)),
            message(3, hx(6, 5), None),
        ];
        let s = TickSummary::measure(Tick(3), &agents, hx(5, 5));
        assert_eq!(s.tick, Tick(3));
        assert!((s.mean_target_distance - (0.0 + 2.0 + 3.0 + 1.0) / 4.0).abs() < 1e-12);
        // (2,5) ↔ (5,7): dr = 3, dc = 2 → 5.
        assert_eq!(s.diameter, 5);
        assert_eq!(s.num_clusters, 2);
        assert_eq!(s.agents_at_target, 1);
    }

    #[test]
    fn empty_swarm_measures_zero() {
        let s = TickSummary::measure(Tick(0), &[], hx(1, 1));
        assert_eq!(s.mean_target_distance, 0.0);
        assert_eq!(s.diameter, 0);
        assert_eq!(s.num_clusters, 0);
    }
}

// ── Scenario loading ──────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let json = r#"{
            "num_of_steps": 12,
            "target_location": [5, 5],
            "agent_locations": [[0, 0], [1, 0]],
            "type_of_strategy": "meso"
        }"#;
        let scenario = Scenario::from_reader(json.as_bytes()).unwrap();
        assert_eq!(scenario.num_of_steps, 12);
        assert_eq!(scenario.target_location, hx(5, 5));
        assert!(scenario.wall_locations.is_empty());
        assert_eq!(scenario.cluster_radius, 3);
        assert_eq!(scenario.clustering, ClusteringMethod::Affinity);

        let config = scenario.sim_config();
        assert_eq!(config.total_ticks, 12);
        assert_eq!(config.penalty_steps, 2);
        assert_eq!(config.output_interval_ticks, 1);
        assert_eq!(config.recluster_interval_ticks, 0);
    }

    #[test]
    fn full_scenario_parses() {
        let scenario = Scenario::from_reader(CORRIDOR_JSON.as_bytes()).unwrap();
        assert_eq!(scenario.wall_locations.len(), 7);
        assert_eq!(scenario.agent_locations[3], hx(1, 1));
        assert_eq!(scenario.seed, 11);
        assert_eq!(scenario.recluster_interval_ticks, 5);
    }

    #[test]
    fn radius_clustering_is_selectable() {
        let json = r#"{
            "num_of_steps": 1,
            "target_location": [0, 3],
            "agent_locations": [[0, 0]],
            "clustering": "radius",
            "cluster_radius": 2
        }"#;
        let scenario = Scenario::from_reader(json.as_bytes()).unwrap();
        assert_eq!(scenario.clustering, ClusteringMethod::Radius);
        assert_eq!(scenario.assigner().assign(&[hx(0, 0), hx(0, 2), hx(0, 5)]), vec![0, 0, 1]);
    }

    #[test]
    fn malformed_json_errors() {
        let result = Scenario::from_reader("{ \"num_of_steps\": 3 ".as_bytes());
        assert!(matches!(result, Err(SimError::Json(_))));
    }

    #[test]
    fn missing_file_errors() {
        let result = Scenario::from_path("/nonexistent/hexswarm/scenario.json");
        assert!(matches!(result, Err(SimError::Io(_))));
    }

    #[test]
    fn build_sim_creates_one_agent_per_start() {
        let scenario = Scenario::from_reader(CORRIDOR_JSON.as_bytes()).unwrap();
        let sim = scenario.build_sim().unwrap();
        assert_eq!(sim.agents.len(), 5);
        assert_eq!(sim.positions(), scenario.agent_locations);
        assert_eq!(sim.walls.len(), 7);
        assert!(sim.agents.iter().all(|a| a.target() == hx(2, 8)));
    }

    #[test]
    fn empty_agent_list_errors() {
        let json = r#"{ "num_of_steps": 1, "target_location": [0, 0], "agent_locations": [] }"#;
        let scenario = Scenario::from_reader(json.as_bytes()).unwrap();
        assert!(matches!(scenario.build_sim(), Err(SimError::Config(_))));
    }

    #[test]
    fn zero_cluster_radius_errors() {
        let json = r#"{
            "num_of_steps": 1,
            "target_location": [3, 3],
            "agent_locations": [[0, 0]],
            "cluster_radius": 0
        }"#;
        let scenario = Scenario::from_reader(json.as_bytes()).unwrap();
        assert!(matches!(scenario.build_sim(), Err(SimError::Behavior(_))));
    }
}

// ── Whole-run properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn agents_never_stand_on_walls_or_share_cells() {
        let scenario = Scenario::from_reader(CORRIDOR_JSON.as_bytes()).unwrap();
        let walls: HashSet<HexCoord> = scenario.wall_locations.iter().copied().collect();
        let mut sim = scenario.build_sim().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.snapshots.len(), 60);
        for (tick, agents) in &rec.snapshots {
            let cells: HashSet<HexCoord> = agents.iter().map(|a| a.location).collect();
            assert_eq!(cells.len(), agents.len(), "two agents share a cell at {tick}");
            assert!(cells.is_disjoint(&walls), "agent on a wall at {tick}");
        }
    }

    #[test]
    fn every_committed_step_is_a_unit_move_or_stay() {
        let mut scenario = Scenario::from_reader(CORRIDOR_JSON.as_bytes()).unwrap();
        scenario.clustering = ClusteringMethod::Radius;
        let mut sim = scenario.build_sim().unwrap();

        let mut before = sim.positions();
        for _ in 0..40 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            let after = sim.positions();
            for (a, b) in before.iter().zip(&after) {
                let step = *b - *a;
                assert!(step == HexCoord::ZERO || step.is_unit_move(), "illegal step {step}");
            }
            before = after;
        }
    }

    #[test]
    fn same_seed_gives_identical_trajectories() {
        let scenario = Scenario::from_reader(CORRIDOR_JSON.as_bytes()).unwrap();
        let mut a = scenario.build_sim().unwrap();
        let mut b = scenario.build_sim().unwrap();

        for _ in 0..scenario.num_of_steps {
            a.run_ticks(1, &mut NoopObserver).unwrap();
            b.run_ticks(1, &mut NoopObserver).unwrap();
            assert_eq!(a.positions(), b.positions());
        }
        assert_eq!(a.messages(), b.messages());
    }
}
