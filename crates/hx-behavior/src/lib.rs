//! `hx-behavior` — per-agent decision policies.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`message`]     | `AgentMessage`, `PeerSnapshot` — read-only per-tick peer view |
//! | [`model`]       | `AgentBehavior` trait driven by the orchestrator              |
//! | [`consensus`]   | `ClusterConsensus` — cluster-relative targeting state machine |
//! | [`correction`]  | Trust/confidence-weighted direction blending                  |
//! | [`recovery`]    | Local search around a blocked move                            |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! A behavior only ever mutates itself.  Everything it knows about its peers
//! arrives as a value snapshot ([`PeerSnapshot`]), and cluster labels arrive
//! from the orchestrator's single resolution pass per epoch.  That keeps the
//! decision phase free of cross-agent writes, so the orchestrator may run it
//! in any order or in parallel.

pub mod consensus;
pub mod correction;
pub mod error;
pub mod message;
pub mod model;
pub mod recovery;


pub use consensus::ClusterConsensus;
pub use error::{BehaviorError, BehaviorResult};
pub use message::{AgentMessage, PeerSnapshot};
pub use model::AgentBehavior;
