//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use hx_behavior::{AgentBehavior, AgentMessage, PeerSnapshot};
use hx_cluster::{ClusterAssigner, ClusterResolution};
use hx_core::{AgentRng, HexCoord, SimConfig, Tick, WallSet};
use tracing::{debug, info, trace};

use crate::arbitration::{MovePlan, arbitrate};
use crate::{SimObserver, SimResult, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B, C>` owns every agent behavior and drives the synchronous tick
/// protocol described in the [crate docs](crate).  Behaviors only ever see
/// each other through [`PeerSnapshot`] values built here.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: AgentBehavior, C: ClusterAssigner> {
    /// Run configuration (total ticks, seed, epoch length, …).
    pub config: SimConfig,

    /// The tick that will be processed next.
    pub current_tick: Tick,

    /// Agent behaviors; `agents[i].agent_id() == AgentId(i)`.
    pub agents: Vec<B>,

    /// Per-agent deterministic RNGs, parallel to `agents`.
    pub rngs: Vec<AgentRng>,

    /// Partitioning used by the once-per-epoch cluster resolution.
    pub assigner: C,

    /// Static obstacles, shared with the behaviors.
    pub walls: Arc<WallSet>,

    /// The common target cell.
    pub target: HexCoord,
}

impl<B: AgentBehavior, C: ClusterAssigner> Sim<B, C> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.agents.len(),
            walls = self.walls.len(),
            ticks = self.config.total_ticks,
            target = %self.target,
            "simulation started"
        );
        while self.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.current_tick, &self.messages());
        info!(final_tick = %self.current_tick, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Every agent's current message, in agent order.
    pub fn messages(&self) -> Vec<AgentMessage> {
        self.agents.iter().map(|a| a.get_message()).collect()
    }

    /// Every agent's current cell, in agent order.
    pub fn positions(&self) -> Vec<HexCoord> {
        self.agents.iter().map(|a| a.location()).collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick;
        observer.on_tick_start(now);

        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);
        if self.config.is_snapshot_tick(now) {
            observer.on_snapshot(now, &self.messages());
        }

        if self.config.is_epoch_end(now) {
            debug!(tick = %now, "epoch end: clearing cluster assignments");
            for agent in &mut self.agents {
                agent.reset();
            }
        }

        self.current_tick = now + 1;
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        // ── Phase 1: message exchange ─────────────────────────────────────
        let snapshot = self.exchange_messages();

        // ── Phase 2: cluster resolution (once per epoch) ──────────────────
        //
        // Runs here, not inside an agent, so no behavior ever writes cluster
        // state onto a peer.
        if self.agents.iter().any(|a| a.needs_cluster()) {
            let resolution = ClusterResolution::resolve(&self.assigner, &snapshot.positions());
            debug!(tick = %now, clusters = resolution.num_clusters(), "clusters resolved");
            for agent in &mut self.agents {
                if let Some(assignment) = resolution.get(agent.agent_id()) {
                    agent.assign_cluster(assignment);
                }
            }
        }

        // ── Phase 3: decision ─────────────────────────────────────────────
        self.for_each_agent(|agent, rng| agent.compute_action(rng));

        // ── Phase 4: intent exchange + correction ─────────────────────────
        //
        // The second snapshot carries this tick's intended moves and the
        // confidence raised by obstacle recovery.
        self.exchange_messages();
        self.for_each_agent(|agent, rng| agent.correct_next_move(rng));

        // ── Phase 5: arbitration ──────────────────────────────────────────
        let plans: Vec<MovePlan> = self
            .agents
            .iter()
            .map(|a| MovePlan { from: a.location(), step: a.planned_move() })
            .collect();
        for i in arbitrate(&plans, &self.walls) {
            self.agents[i].reject_move(self.config.penalty_steps);
        }

        // ── Phase 6: commit ───────────────────────────────────────────────
        for agent in &mut self.agents {
            agent.do_action();
        }

        // ── Phase 7: metrics ──────────────────────────────────────────────
        let summary = TickSummary::measure(now, &self.messages(), self.target);
        trace!(
            tick = %now,
            mean_target_distance = summary.mean_target_distance,
            diameter = summary.diameter,
            clusters = summary.num_clusters,
            "tick complete"
        );
        Ok(summary)
    }

    /// Publish every agent's message and deliver the shared snapshot.
    fn exchange_messages(&mut self) -> Arc<PeerSnapshot> {
        let snapshot: Arc<PeerSnapshot> =
            Arc::new(self.agents.iter().map(|a| a.get_message()).collect());
        for agent in &mut self.agents {
            agent.receive_messages(Arc::clone(&snapshot));
        }
        snapshot
    }

    /// Apply `f` to every agent with its own RNG.
    ///
    /// With the `parallel` Cargo feature the calls run on Rayon's thread
    /// pool; each agent still gets exactly its own RNG, so results do not
    /// depend on scheduling.
    fn for_each_agent<F>(&mut self, f: F)
    where
        F: Fn(&mut B, &mut AgentRng) + Send + Sync,
    {
        #[cfg(not(feature = "parallel"))]
        {
            for (agent, rng) in self.agents.iter_mut().zip(self.rngs.iter_mut()) {
                f(agent, rng);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .zip(self.rngs.par_iter_mut())
                .for_each(|(agent, rng)| f(agent, rng));
        }
    }
}
