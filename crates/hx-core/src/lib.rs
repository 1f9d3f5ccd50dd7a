//! `hx-core` — foundational types for the `hexswarm` simulator.
//!
//! This crate is a dependency of every other `hx-*` crate.  It has no `hx-*`
//! dependencies and few external ones (`rand`, `rustc-hash`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`hex`]     | `HexCoord` and the axial movement algebra               |
//! | [`walls`]   | `WallSet` — immutable obstacle cells                    |
//! | [`ids`]     | `AgentId`, `ClusterId`                                  |
//! | [`time`]    | `Tick`, `SimConfig`                                     |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod hex;
pub mod ids;
pub mod rng;
pub mod time;
pub mod walls;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use hex::HexCoord;
pub use ids::{AgentId, ClusterId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimConfig, Tick};
pub use walls::WallSet;
