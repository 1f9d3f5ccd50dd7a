//! Fluent builder for constructing a [`Sim`].

use std::collections::HashMap;
use std::sync::Arc;

use hx_behavior::AgentBehavior;
use hx_cluster::ClusterAssigner;
use hx_core::{AgentId, AgentRng, HexCoord, SimConfig, Tick, WallSet};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<B, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, epoch length, …
/// - `Vec<B>` — one behavior per agent, `agents[i]` carrying `AgentId(i)`
/// - `C: ClusterAssigner` — the partitioning method
/// - the common target cell
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default              |
/// |---------------|----------------------|
/// | `.walls(w)`   | `WallSet::empty()`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, behaviors, RadiusLinkage::new(3), target)
///     .walls(walls)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: AgentBehavior, C: ClusterAssigner> {
    config:   SimConfig,
    agents:   Vec<B>,
    assigner: C,
    target:   HexCoord,
    walls:    Option<Arc<WallSet>>,
}

impl<B: AgentBehavior, C: ClusterAssigner> SimBuilder<B, C> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: Vec<B>, assigner: C, target: HexCoord) -> Self {
        Self {
            config,
            agents,
            assigner,
            target,
            walls: None,
        }
    }

    /// Supply the wall set used for arbitration.
    ///
    /// Pass the same `Arc` the behaviors were built with.
    pub fn walls(mut self, walls: Arc<WallSet>) -> Self {
        self.walls = Some(walls);
        self
    }

    /// Validate inputs, seed the per-agent RNGs, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<B, C>> {
        let walls = self.walls.unwrap_or_default();

        // ── Validate agents ───────────────────────────────────────────────
        let mut occupied: HashMap<HexCoord, AgentId> = HashMap::with_capacity(self.agents.len());
        for (index, agent) in self.agents.iter().enumerate() {
            let id = agent.agent_id();
            if id.index() != index {
                return Err(SimError::AgentIdMismatch { index, got: id });
            }
            let cell = agent.location();
            if walls.contains(cell) {
                return Err(SimError::StartOnWall { agent: id, cell });
            }
            if let Some(&first) = occupied.get(&cell) {
                return Err(SimError::SharedStart { first, second: id, cell });
            }
            occupied.insert(cell, id);
        }
        if walls.contains(self.target) {
            return Err(SimError::Config(format!("target {} is a wall", self.target)));
        }

        let rngs = self
            .agents
            .iter()
            .map(|a| AgentRng::new(self.config.seed, a.agent_id()))
            .collect();

        Ok(Sim {
            config:       self.config,
            current_tick: Tick::ZERO,
            agents:       self.agents,
            rngs,
            assigner:     self.assigner,
            walls,
            target:       self.target,
        })
    }
}
