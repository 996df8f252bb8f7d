//! Pure per-particle physics: forces, integration, collisions.
//!
//! Nothing in this crate owns particles or threads; the runtime in
//! `swarm_sim` decides which slices are handed to which function.

pub mod collision;
pub mod energy;
pub mod forces;
pub mod integrator;
pub mod layout;
