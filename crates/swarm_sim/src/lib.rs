pub mod pipeline;
pub mod ports;
pub mod scheduler;
pub mod swarm;
pub mod system;

pub use pipeline::{PlacementOutput, PointerInput, RunLimits, SimulationPlugin, StopSignal};
pub use ports::{
    ContainerSource, FixedPointer, OrbitingPointer, PlacementSink, PointerSource, VirtualDesktop,
};
pub use swarm::{EmitReport, FrameReport, Swarm};
pub use system::ParticleSystem;
