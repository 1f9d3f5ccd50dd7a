//! The `AgentBehavior` trait — the contract the orchestrator drives each tick.

use std::sync::Arc;

use hx_cluster::ClusterAssignment;
use hx_core::{AgentId, AgentRng, HexCoord};

use crate::{AgentMessage, PeerSnapshot};

/// Pluggable per-agent movement policy.
///
/// # Call order
///
/// The orchestrator calls these in a fixed phase order every tick, finishing
/// each phase for all agents before starting the next:
///
/// 1. [`get_message`] → snapshot → [`receive_messages`]
/// 2. [`needs_cluster`] / [`assign_cluster`] (once per epoch)
/// 3. [`compute_action`]
/// 4. [`get_message`] → snapshot → [`receive_messages`], then
///    [`correct_next_move`]
/// 5. [`planned_move`] / [`reject_move`] (arbitration)
/// 6. [`do_action`]
///
/// [`reset`] is called at epoch boundaries, after step 6.
///
/// # Thread safety
///
/// Behaviors must be `Send`; with the `parallel` feature of `hx-sim` each
/// one is handed to a Rayon worker for steps 3 and 4.  A behavior never
/// mutates another agent.
///
/// [`get_message`]: Self::get_message
/// [`receive_messages`]: Self::receive_messages
/// [`needs_cluster`]: Self::needs_cluster
/// [`assign_cluster`]: Self::assign_cluster
/// [`compute_action`]: Self::compute_action
/// [`correct_next_move`]: Self::correct_next_move
/// [`planned_move`]: Self::planned_move
/// [`reject_move`]: Self::reject_move
/// [`do_action`]: Self::do_action
/// [`reset`]: Self::reset
pub trait AgentBehavior: Send {
    fn agent_id(&self) -> AgentId;

    /// Current cell.
    fn location(&self) -> HexCoord;

    /// This agent's state as published to peers.
    fn get_message(&self) -> AgentMessage;

    /// Store the peer snapshot for use during the current tick.
    fn receive_messages(&mut self, snapshot: Arc<PeerSnapshot>);

    /// `true` if this agent has no cluster for the current epoch.
    ///
    /// Default: cluster-agnostic behaviors never need one.
    fn needs_cluster(&self) -> bool {
        false
    }

    /// Accept the cluster label and centroid for the current epoch.
    fn assign_cluster(&mut self, _assignment: ClusterAssignment) {}

    /// Decide the intended move for this tick.
    fn compute_action(&mut self, rng: &mut AgentRng);

    /// Revise the intended move using the peer snapshot.
    ///
    /// Default: keep the computed move.
    fn correct_next_move(&mut self, _rng: &mut AgentRng) {}

    /// The offset [`do_action`](Self::do_action) will apply this tick, or
    /// zero if the agent will not move.
    fn planned_move(&self) -> HexCoord;

    /// Cancel this tick's move and charge `penalty_steps` penalty steps.
    fn reject_move(&mut self, penalty_steps: u32);

    /// Commit this tick's decision.
    fn do_action(&mut self);

    /// Forget the current epoch's cluster assignment.
    ///
    /// Default: no-op.
    fn reset(&mut self) {}
}
