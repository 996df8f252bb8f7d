use thiserror::Error;

/// Every failure the engine can report.
///
/// Only start-up errors are fatal; `Placement` is raised per slot by a sink and
/// the frame loop skips the slot and carries on.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// The container exposes no addressable slots, so there is nothing to simulate.
    #[error("container has no addressable slots")]
    NoSlots,
    /// The external container could not be found.
    #[error("container unavailable: {0}")]
    ContainerUnavailable(String),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A single slot could not be moved this frame.
    #[error("failed to place slot {slot}: {reason}")]
    Placement { slot: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
