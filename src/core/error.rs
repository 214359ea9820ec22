use thiserror::Error;

use crate::core::types::{AgentId, TaskId};
use crate::entity::tasks::TaskStatus;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Agent not found: {0:?}")]
    UnknownAgent(AgentId),

    #[error("Task not found: {0}")]
    UnknownTask(TaskId),

    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Invalid task transition for {task}: {from:?} -> {to:?}")]
    InvalidTransition {
        task: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
