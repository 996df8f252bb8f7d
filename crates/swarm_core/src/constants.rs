// Tuning constants shared by the physics and runtime crates.
// Units are screen pixels and seconds.

/// Added to every center and pair distance before dividing, so coincident points stay finite
pub const SOFTENING: f32 = 0.01;

/// Distance substituted for exactly coincident centers during collision resolution
pub const MIN_COLLISION_DISTANCE: f32 = 0.1;

/// Radius of every particle unless the config overrides it
pub const DEFAULT_PARTICLE_RADIUS: f32 = 25.0;

/// Radius of the start-up circle the particles are laid out on
pub const DEFAULT_LAYOUT_RADIUS: f32 = 200.0;

/// Fixed simulation timestep (seconds)
pub const DT: f32 = 0.03;

/// Speed ceiling applied after each integration step
pub const MAX_SPEED: f32 = 300.0;

/// Per-frame velocity scale for the clamp-and-damp boundary policy
pub const DAMPING_FACTOR: f32 = 0.92;

/// Velocity impulse per unit of overlap
pub const SEPARATION_STRENGTH: f32 = 5.0;

/// Share of the overlap each particle is moved by directly
pub const CORRECTION_FACTOR: f32 = 0.5;

/// Default size of the force-phase worker pool
pub const WORKER_COUNT: usize = 25;

/// Multiplier used to derive independent per-particle stream seeds
pub const STREAM_SEED_STRIDE: u64 = 7919;
