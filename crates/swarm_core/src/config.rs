use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, SwarmError};
use crate::types::Bounds;

/// How a particle that reaches the edge of the screen is kept inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Clamp to the edge and flip the offending velocity component inward. No damping.
    #[default]
    Bounce,
    /// Clamp to the edge without reflection, then damp the whole velocity every frame.
    ClampAndDamp,
}

/// Simulation configuration, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed timestep (seconds)
    pub dt: f32,
    /// Pull toward the screen center. Zero disables the term.
    pub center_gravity_strength: f32,
    /// Pairwise pull between particles. Negative values push them apart.
    pub particle_gravity_strength: f32,
    /// Pointer repulsion only acts closer than this
    pub mouse_influence_radius: f32,
    pub mouse_repulsion_strength: f32,
    /// Half-width of the uniform per-axis random kick
    pub jitter_strength: f32,
    pub max_speed: f32,
    /// Only used by `BoundaryMode::ClampAndDamp`
    pub damping_factor: f32,
    pub separation_strength: f32,
    pub correction_factor: f32,
    /// Number of force-phase partitions (and pool threads)
    pub worker_count: usize,
    pub boundary_mode: BoundaryMode,
    /// Base seed for the per-particle random streams; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub particle_radius: f32,
    pub layout_radius: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: DT,
            center_gravity_strength: 0.0,
            particle_gravity_strength: 1_500_000.0,
            mouse_influence_radius: 150.0,
            mouse_repulsion_strength: 1_000_000_000.0,
            jitter_strength: 15.0,
            max_speed: MAX_SPEED,
            damping_factor: DAMPING_FACTOR,
            separation_strength: SEPARATION_STRENGTH,
            correction_factor: CORRECTION_FACTOR,
            worker_count: WORKER_COUNT,
            boundary_mode: BoundaryMode::Bounce,
            seed: Some(42),
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            layout_radius: DEFAULT_LAYOUT_RADIUS,
        }
    }
}

impl SimulationConfig {
    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: impl Into<String>) -> Result<()> {
            Err(SwarmError::InvalidConfig(msg.into()))
        }

        let finite = [
            ("dt", self.dt),
            ("center_gravity_strength", self.center_gravity_strength),
            ("particle_gravity_strength", self.particle_gravity_strength),
            ("mouse_influence_radius", self.mouse_influence_radius),
            ("mouse_repulsion_strength", self.mouse_repulsion_strength),
            ("jitter_strength", self.jitter_strength),
            ("max_speed", self.max_speed),
            ("damping_factor", self.damping_factor),
            ("separation_strength", self.separation_strength),
            ("correction_factor", self.correction_factor),
            ("particle_radius", self.particle_radius),
            ("layout_radius", self.layout_radius),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite"));
        }

        if self.dt <= 0.0 {
            return invalid("dt must be positive");
        }
        if self.max_speed <= 0.0 {
            return invalid("max_speed must be positive");
        }
        if self.particle_radius <= 0.0 {
            return invalid("particle_radius must be positive");
        }
        if self.jitter_strength < 0.0 {
            return invalid("jitter_strength must not be negative");
        }
        if self.mouse_influence_radius < 0.0 {
            return invalid("mouse_influence_radius must not be negative");
        }
        if self.damping_factor <= 0.0 || self.damping_factor > 1.0 {
            return invalid("damping_factor must be in (0, 1]");
        }
        if self.worker_count == 0 {
            return invalid("worker_count must be at least 1");
        }
        Ok(())
    }

    /// Check that a particle of the configured radius fits inside `bounds`
    pub fn validate_bounds(&self, bounds: &Bounds) -> Result<()> {
        if !bounds.width.is_finite() || !bounds.height.is_finite() {
            return Err(SwarmError::InvalidConfig(format!(
                "screen extent {}x{} must be finite",
                bounds.width, bounds.height
            )));
        }
        let diameter = self.particle_radius * 2.0;
        if bounds.width <= diameter || bounds.height <= diameter {
            return Err(SwarmError::InvalidConfig(format!(
                "screen {}x{} is too small for particles of radius {}",
                bounds.width, bounds.height, self.particle_radius
            )));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file. Missing fields take their defaults.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
