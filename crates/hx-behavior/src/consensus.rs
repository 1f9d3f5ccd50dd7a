//! Cluster-consensus movement: every agent steers so that its cluster as a
//! whole translates toward the shared target, corrects its heading with
//! cluster-mates that are routing around obstacles, and falls back to
//! local search or random wandering when blocked.
//!
//! # Per-tick state machine
//!
//! ```text
//! compute_action ─┬─ random flag set ──────────► random unit move, trust = confidence = 0
//!                 ├─ centroid == target ───────► stay
//!                 └─ otherwise ────────────────► step toward target − centroid + location
//!                 then: destination is a wall ─► obstacle recovery (trust = 0, confidence = 1)
//!
//! correct_next_move ─► blend heading with cluster-mates, re-check walls
//!
//! do_action ─► trust = 1, confidence = 0
//!              no cluster ─────────────────────► stay
//!              penalty > 0 ────────────────────► penalty −= 1, random flag on, stay
//!              otherwise ──────────────────────► move, random flag off
//! ```

use std::sync::Arc;

use hx_cluster::ClusterAssignment;
use hx_core::{AgentId, AgentRng, ClusterId, HexCoord, WallSet};
use tracing::{debug, trace};

use crate::correction::{PeerIntent, blend_direction};
use crate::recovery::recover_from_obstacle;
use crate::{AgentBehavior, AgentMessage, BehaviorError, BehaviorResult, PeerSnapshot};

/// Full trust / confidence.
const FULL: f32 = 1.0;
/// No trust / confidence.
const NONE: f32 = 0.0;

/// The cluster-consensus agent policy and its per-agent state.
#[derive(Clone, Debug)]
pub struct ClusterConsensus {
    // ── Fixed for the run ─────────────────────────────────────────────────
    pub(crate) agent_id:        AgentId,
    pub(crate) cluster_radius:  u32,
    pub(crate) walls:           Arc<WallSet>,
    pub(crate) target:          HexCoord,

    // ── Mutable per tick ──────────────────────────────────────────────────
    pub(crate) location:          HexCoord,
    pub(crate) previous_location: HexCoord,
    pub(crate) next_move:         HexCoord,
    pub(crate) cluster_id:        ClusterId,
    pub(crate) cluster_defined:   bool,
    pub(crate) cluster_center:    HexCoord,
    pub(crate) random_move:       bool,
    pub(crate) penalty_steps:     u32,
    /// How much this agent accepts peer correction (0 or 1).
    pub(crate) trust:             f32,
    /// How much peers should weight this agent's direction (0 or 1).
    pub(crate) confidence:        f32,
    pub(crate) messages:          Arc<PeerSnapshot>,
}

impl ClusterConsensus {
    /// Create an agent at `location` heading for `target`.
    ///
    /// Fails if `cluster_radius` is zero.
    pub fn new(
        agent_id:       AgentId,
        location:       HexCoord,
        target:         HexCoord,
        cluster_radius: u32,
        walls:          Arc<WallSet>,
    ) -> BehaviorResult<Self> {
        if cluster_radius == 0 {
            return Err(BehaviorError::Config(format!(
                "{agent_id}: cluster radius must be positive"
            )));
        }
        Ok(Self {
            agent_id,
            cluster_radius,
            walls,
            target,
            location,
            previous_location: location,
            next_move: HexCoord::ZERO,
            cluster_id: ClusterId::UNASSIGNED,
            cluster_defined: false,
            cluster_center: location,
            random_move: false,
            penalty_steps: 0,
            trust: FULL,
            confidence: NONE,
            messages: Arc::new(PeerSnapshot::empty()),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn target(&self) -> HexCoord {
        self.target
    }

    pub fn cluster_radius(&self) -> u32 {
        self.cluster_radius
    }

    pub fn previous_location(&self) -> HexCoord {
        self.previous_location
    }

    pub fn next_move(&self) -> HexCoord {
        self.next_move
    }

    pub fn cluster_id(&self) -> ClusterId {
        self.cluster_id
    }

    pub fn is_cluster_defined(&self) -> bool {
        self.cluster_defined
    }

    pub fn cluster_center(&self) -> HexCoord {
        self.cluster_center
    }

    pub fn is_random_move(&self) -> bool {
        self.random_move
    }

    pub fn penalty_steps(&self) -> u32 {
        self.penalty_steps
    }

    pub fn trust(&self) -> f32 {
        self.trust
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    // ── Decision steps ────────────────────────────────────────────────────

    fn compute_next_move(&mut self, rng: &mut AgentRng) {
        if self.random_move {
            self.trust = NONE;
            self.confidence = NONE;
            self.next_move = HexCoord::random_move(rng);
        } else if self.cluster_center == self.target {
            self.next_move = HexCoord::ZERO;
        } else {
            let shifted_target = self.target - self.cluster_center + self.location;
            self.next_move = self.location.compute_move(shifted_target);
        }
    }

    fn blocked(&self) -> bool {
        self.walls.contains(self.location + self.next_move)
    }

    fn avoid_obstacle(&mut self, rng: &mut AgentRng) {
        let blocked = self.next_move;
        self.next_move = recover_from_obstacle(
            self.location,
            self.previous_location,
            blocked,
            self.target,
            &self.walls,
            rng,
        );
        self.trust = NONE;
        self.confidence = FULL;
        debug!(
            agent = self.agent_id.0,
            location = %self.location,
            blocked = %blocked,
            chosen = %self.next_move,
            "obstacle recovery"
        );
    }
}

impl AgentBehavior for ClusterConsensus {
    fn agent_id(&self) -> AgentId {
        self.agent_id
    }

    fn location(&self) -> HexCoord {
        self.location
    }

    fn get_message(&self) -> AgentMessage {
        AgentMessage {
            agent_id:        self.agent_id,
            location:        self.location,
            next_move:       self.next_move,
            cluster_id:      self.cluster_id,
            cluster_defined: self.cluster_defined,
            confidence:      self.confidence,
        }
    }

    fn receive_messages(&mut self, snapshot: Arc<PeerSnapshot>) {
        self.messages = snapshot;
    }

    fn needs_cluster(&self) -> bool {
        !self.cluster_defined
    }

    fn assign_cluster(&mut self, assignment: ClusterAssignment) {
        self.cluster_id = assignment.cluster_id;
        self.cluster_center = assignment.centroid;
        self.cluster_defined = true;
    }

    fn compute_action(&mut self, rng: &mut AgentRng) {
        self.compute_next_move(rng);
        if self.blocked() {
            self.avoid_obstacle(rng);
        }
        trace!(agent = self.agent_id.0, next_move = %self.next_move, "computed move");
    }

    fn correct_next_move(&mut self, rng: &mut AgentRng) {
        if let Some(own_degrees) = self.next_move.direction_in_degrees() {
            let location = self.location;
            let peers = self
                .messages
                .cluster_mates(self.agent_id, self.cluster_id)
                .filter_map(|peer| {
                    peer.next_move.direction_in_degrees().map(|direction_degrees| PeerIntent {
                        direction_degrees,
                        confidence: peer.confidence,
                        distance:   location.distance(peer.location),
                    })
                });
            let blended = blend_direction(own_degrees, self.trust, peers);
            self.next_move = HexCoord::direction_from_degrees(blended);
        }

        if self.cluster_center == self.target {
            self.next_move = self.location.compute_move(self.cluster_center);
        }

        if self.blocked() {
            self.avoid_obstacle(rng);
        }
    }

    fn planned_move(&self) -> HexCoord {
        if !self.cluster_defined || self.penalty_steps > 0 {
            HexCoord::ZERO
        } else {
            self.next_move
        }
    }

    fn reject_move(&mut self, penalty_steps: u32) {
        debug!(
            agent = self.agent_id.0,
            rejected = %self.next_move,
            penalty_steps,
            "move rejected"
        );
        self.next_move = HexCoord::ZERO;
        self.penalty_steps += penalty_steps;
    }

    fn do_action(&mut self) {
        self.trust = FULL;
        self.confidence = NONE;

        if !self.cluster_defined {
            return;
        }
        if self.penalty_steps > 0 {
            self.penalty_steps -= 1;
            self.random_move = true;
            return;
        }
        self.previous_location = self.location;
        self.location += self.next_move;
        self.random_move = false;
    }

    fn reset(&mut self) {
        self.cluster_id = ClusterId::UNASSIGNED;
        self.cluster_defined = false;
        self.cluster_center = self.location;
    }
}
