use hx_behavior::BehaviorError;
use hx_core::{AgentId, HexCoord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("agent at index {index} reports id {got}; ids must match their position")]
    AgentIdMismatch {
        index: usize,
        got:   AgentId,
    },

    #[error("agents {first} and {second} both start at {cell}")]
    SharedStart {
        first:  AgentId,
        second: AgentId,
        cell:   HexCoord,
    },

    #[error("{agent} starts on a wall at {cell}")]
    StartOnWall {
        agent: AgentId,
        cell:  HexCoord,
    },

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("scenario parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
