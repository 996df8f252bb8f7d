pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{BoundaryMode, SimulationConfig};
pub use constants::*;
pub use error::{Result, SwarmError};
pub use types::*;
