//! Simulation errors

use std::path::PathBuf;

use thiserror::Error;

use crate::controller::ControllerError;
use crate::direction::Direction;

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Vehicle from {entering} entered while {occupant} vehicles were inside")]
    ExclusionViolated {
        entering: Direction,
        occupant: Direction,
    },

    #[error("Vehicle thread {0} panicked")]
    VehiclePanicked(usize),

    #[error("Failed to spawn vehicle thread {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Controller still shared after all vehicles finished")]
    ControllerStillShared,

    #[error(transparent)]
    Controller(#[from] ControllerError),
}

impl SimulationError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Errors that mean the controller itself is broken.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ExclusionViolated { .. } | Self::Controller(_))
    }
}
