use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use swarm_core::constants::STREAM_SEED_STRIDE;
use swarm_core::{Bounds, Particle, Result, SimulationConfig};
use swarm_physics::layout;

/// Independent random stream for the particle in slot `index`
pub fn particle_stream(seed: Option<u64>, index: usize) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(index as u64 * STREAM_SEED_STRIDE))
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

/// The fixed, order-stable particle collection.
///
/// Slot `i` of `particles` and `streams` always belongs to external slot `i`.
/// The set is sized once and never grows or shrinks.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    streams: Vec<ChaCha8Rng>,
    bounds: Bounds,
}

impl ParticleSystem {
    /// Lay out `n` particles on the start-up circle. Fails if `n == 0`.
    pub fn initialize(n: usize, bounds: Bounds, config: &SimulationConfig) -> Result<Self> {
        let particles =
            layout::circle_layout(n, &bounds, config.layout_radius, config.particle_radius)?;
        let streams = (0..n).map(|i| particle_stream(config.seed, i)).collect();

        Ok(Self {
            particles,
            streams,
            bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Copy of every position, indexed by slot
    pub fn positions(&self) -> Vec<[f32; 2]> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Particles and their streams, borrowed together for the force phase
    pub fn split_mut(&mut self) -> (&mut [Particle], &mut [ChaCha8Rng]) {
        (&mut self.particles, &mut self.streams)
    }
}
