//! JSON scenario loader.
//!
//! # Format
//!
//! Coordinates are `[row, column]` pairs.  Only `num_of_steps`,
//! `target_location`, and `agent_locations` are required; unknown keys are
//! ignored.
//!
//! ```json
//! {
//!   "num_of_steps": 120,
//!   "target_location": [12, 12],
//!   "wall_locations": [[4, 4], [4, 5], [5, 3]],
//!   "agent_locations": [[0, 0], [0, 1], [1, 0]],
//!   "cluster_radius": 3,
//!   "seed": 7,
//!   "clustering": "radius",
//!   "recluster_interval_ticks": 10,
//!   "penalty_steps": 2,
//!   "output_interval_ticks": 1
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hx_behavior::ClusterConsensus;
use hx_cluster::{AffinityPropagation, ClusterAssigner, RadiusLinkage};
use hx_core::{AgentId, HexCoord, SimConfig, WallSet};

use crate::{Sim, SimBuilder, SimError, SimResult};

/// Which [`ClusterAssigner`] a scenario uses.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringMethod {
    /// Exemplar-based; the data decides the number of clusters.
    #[default]
    Affinity,
    /// Complete linkage bounded by `cluster_radius`.
    Radius,
}

/// A complete run description.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scenario {
    pub num_of_steps:    u64,
    pub target_location: HexCoord,
    #[serde(default)]
    pub wall_locations:  Vec<HexCoord>,
    pub agent_locations: Vec<HexCoord>,

    #[serde(default = "default_cluster_radius")]
    pub cluster_radius: u32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub clustering: ClusteringMethod,
    #[serde(default)]
    pub recluster_interval_ticks: u64,
    #[serde(default = "default_penalty_steps")]
    pub penalty_steps: u32,
    #[serde(default = "default_output_interval")]
    pub output_interval_ticks: u64,
}

fn default_cluster_radius() -> u32 {
    3
}

fn default_penalty_steps() -> u32 {
    SimConfig::default().penalty_steps
}

fn default_output_interval() -> u64 {
    SimConfig::default().output_interval_ticks
}

/// The simulator type every scenario builds.
pub type ScenarioSim = Sim<ClusterConsensus, Box<dyn ClusterAssigner>>;

impl Scenario {
    /// Parse a scenario from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a scenario from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// The run configuration this scenario describes.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            total_ticks:              self.num_of_steps,
            seed:                     self.seed,
            recluster_interval_ticks: self.recluster_interval_ticks,
            penalty_steps:            self.penalty_steps,
            output_interval_ticks:    self.output_interval_ticks,
        }
    }

    /// The cluster assigner selected by `clustering`.
    pub fn assigner(&self) -> Box<dyn ClusterAssigner> {
        match self.clustering {
            ClusteringMethod::Affinity => Box::new(AffinityPropagation::new(self.seed)),
            ClusteringMethod::Radius => Box::new(RadiusLinkage::new(self.cluster_radius)),
        }
    }

    /// Build one [`ClusterConsensus`] agent per start cell and a ready-to-run
    /// simulator.
    pub fn build_sim(&self) -> SimResult<ScenarioSim> {
        if self.agent_locations.is_empty() {
            return Err(SimError::Config("scenario has no agents".into()));
        }

        let walls: Arc<WallSet> = Arc::new(self.wall_locations.iter().copied().collect());
        let agents = self
            .agent_locations
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let id = AgentId::try_from(i)
                    .map_err(|e| SimError::Config(format!("agent index {i}: {e}")))?;
                Ok(ClusterConsensus::new(
                    id,
                    start,
                    self.target_location,
                    self.cluster_radius,
                    Arc::clone(&walls),
                )?)
            })
            .collect::<SimResult<Vec<_>>>()?;

        SimBuilder::new(self.sim_config(), agents, self.assigner(), self.target_location)
            .walls(walls)
            .build()
    }
}
