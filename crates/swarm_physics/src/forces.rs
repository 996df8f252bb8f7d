use rand::Rng;
use swarm_core::constants::SOFTENING;
use swarm_core::{Particle, SimulationConfig};

/// Pull toward the screen center with fixed magnitude `strength * dt`
pub fn center_gravity(pos: [f32; 2], center: [f32; 2], strength: f32, dt: f32) -> [f32; 2] {
    let dx = center[0] - pos[0];
    let dy = center[1] - pos[1];
    let dist = (dx * dx + dy * dy).sqrt() + SOFTENING;
    let f = strength * dt;

    [dx / dist * f, dy / dist * f]
}

/// Gravity from particle j on particle i, pointing from i toward j.
/// Magnitude is `strength * dt / (d + SOFTENING)^2`.
pub fn pairwise_gravity(pos_i: [f32; 2], pos_j: [f32; 2], strength: f32, dt: f32) -> [f32; 2] {
    let dx = pos_j[0] - pos_i[0];
    let dy = pos_j[1] - pos_i[1];
    let dist = (dx * dx + dy * dy).sqrt() + SOFTENING;
    let f = strength * dt / (dist * dist);

    [dx / dist * f, dy / dist * f]
}

/// Push away from the pointer, only inside `0 < d < radius`
pub fn pointer_repulsion(
    pos: [f32; 2],
    pointer: [f32; 2],
    radius: f32,
    strength: f32,
    dt: f32,
) -> [f32; 2] {
    let dx = pos[0] - pointer[0];
    let dy = pos[1] - pointer[1];
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= 0.0 || dist >= radius {
        return [0.0, 0.0];
    }
    let f = strength / (dist * dist) * dt;

    [dx / dist * f, dy / dist * f]
}

/// Uniform kick in `[-strength, strength]` per axis, scaled by dt
pub fn jitter(rng: &mut impl Rng, strength: f32, dt: f32) -> [f32; 2] {
    if strength <= 0.0 {
        return [0.0, 0.0];
    }
    [
        rng.gen_range(-strength..=strength) * dt,
        rng.gen_range(-strength..=strength) * dt,
    ]
}

/// Read-only view of one frame's force inputs.
///
/// `positions` is the start-of-frame snapshot of every particle, indexed by
/// slot. Nothing here is written while forces are being accumulated, so a
/// single field can be shared by every worker.
pub struct ForceField<'a> {
    pub positions: &'a [[f32; 2]],
    pub pointer: [f32; 2],
    pub center: [f32; 2],
    pub config: &'a SimulationConfig,
}

impl<'a> ForceField<'a> {
    pub fn new(
        positions: &'a [[f32; 2]],
        pointer: [f32; 2],
        center: [f32; 2],
        config: &'a SimulationConfig,
    ) -> Self {
        Self {
            positions,
            pointer,
            center,
            config,
        }
    }

    /// Total force on the particle at `index`
    pub fn compute_force(&self, index: usize, rng: &mut impl Rng) -> [f32; 2] {
        let c = self.config;
        let pos = self.positions[index];

        let mut force = center_gravity(pos, self.center, c.center_gravity_strength, c.dt);

        for (j, &other) in self.positions.iter().enumerate() {
            if j == index {
                continue;
            }
            let g = pairwise_gravity(pos, other, c.particle_gravity_strength, c.dt);
            force[0] += g[0];
            force[1] += g[1];
        }

        let r = pointer_repulsion(
            pos,
            self.pointer,
            c.mouse_influence_radius,
            c.mouse_repulsion_strength,
            c.dt,
        );
        let j = jitter(rng, c.jitter_strength, c.dt);

        [force[0] + r[0] + j[0], force[1] + r[1] + j[1]]
    }

    /// Accumulate forces into one contiguous group of particles.
    ///
    /// `group` and `streams` are the same sub-range of the particle and
    /// stream arrays. Only the group's velocities are written.
    pub fn apply<R: Rng>(&self, group: &mut [Particle], streams: &mut [R]) {
        for (particle, rng) in group.iter_mut().zip(streams.iter_mut()) {
            let force = self.compute_force(particle.index, rng);
            particle.apply_force(force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn magnitude(v: [f32; 2]) -> f32 {
        (v[0] * v[0] + v[1] * v[1]).sqrt()
    }

    #[test]
    fn test_gravity_symmetry() {
        let a1 = pairwise_gravity([0.0, 0.0], [10.0, 0.0], 100.0, 1.0);
        let a2 = pairwise_gravity([10.0, 0.0], [0.0, 0.0], 100.0, 1.0);

        assert!((a1[0] + a2[0]).abs() < 1e-6);
        assert!((a1[1] + a2[1]).abs() < 1e-6);
        assert!(a1[0] > 0.0, "gravity should pull toward the other particle");
    }

    #[test]
    fn test_gravity_decreases_with_distance() {
        let mut last = f32::INFINITY;
        for d in [1.0, 2.0, 5.0, 30.0, 153.0, 400.0, 1500.0] {
            let m = magnitude(pairwise_gravity([0.0, 0.0], [d, 0.0], 1_500_000.0, 0.03));
            assert!(m < last, "magnitude at {d} not below {last}");
            last = m;
        }
    }

    #[test]
    fn test_gravity_inverse_square() {
        let near = pairwise_gravity([0.0, 0.0], [100.0, 0.0], 1.0, 1.0);
        let far = pairwise_gravity([0.0, 0.0], [200.0, 0.0], 1.0, 1.0);

        let ratio = near[0] / far[0];
        assert!((ratio - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_coincident_particles_stay_finite() {
        let g = pairwise_gravity([5.0, 5.0], [5.0, 5.0], 1_500_000.0, 0.03);
        assert_eq!(g, [0.0, 0.0]);
    }

    #[test]
    fn test_zero_center_gravity_is_inert() {
        assert_eq!(center_gravity([10.0, 20.0], [960.0, 540.0], 0.0, 0.03), [0.0, 0.0]);
        let pull = center_gravity([0.0, 540.0], [960.0, 540.0], 100.0, 0.5);
        assert!((pull[0] - 50.0).abs() < 1e-3);
        assert!(pull[1].abs() < 1e-6);
    }

    #[test]
    fn test_pointer_repulsion_window() {
        // Outside the radius
        assert_eq!(pointer_repulsion([0.0, 0.0], [200.0, 0.0], 150.0, 1e9, 0.03), [0.0, 0.0]);
        // Exactly on the pointer
        assert_eq!(pointer_repulsion([7.0, 7.0], [7.0, 7.0], 150.0, 1e9, 0.03), [0.0, 0.0]);
        // Inside: pushed away along -x
        let r = pointer_repulsion([0.0, 0.0], [100.0, 0.0], 150.0, 1e4, 1.0);
        assert!((r[0] + 1.0).abs() < 1e-5);
        assert_eq!(r[1], 0.0);
    }

    #[test]
    fn test_jitter_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let j = jitter(&mut rng, 15.0, 0.03);
            assert!(j[0].abs() <= 15.0 * 0.03 + 1e-6);
            assert!(j[1].abs() <= 15.0 * 0.03 + 1e-6);
        }
        assert_eq!(jitter(&mut rng, 0.0, 0.03), [0.0, 0.0]);
    }

    #[test]
    fn test_apply_writes_only_velocity() {
        let config = SimulationConfig {
            jitter_strength: 0.0,
            ..SimulationConfig::default()
        };
        let mut group = vec![
            Particle::new(0, [100.0, 100.0], 25.0),
            Particle::new(1, [300.0, 100.0], 25.0),
        ];
        let positions: Vec<[f32; 2]> = group.iter().map(|p| p.position).collect();
        let mut streams = vec![ChaCha8Rng::seed_from_u64(0), ChaCha8Rng::seed_from_u64(1)];

        let field = ForceField::new(&positions, [-1000.0, -1000.0], [960.0, 540.0], &config);
        field.apply(&mut group, &mut streams);

        assert_eq!(group[0].position, [100.0, 100.0]);
        assert!(group[0].velocity[0] > 0.0);
        assert!(group[1].velocity[0] < 0.0);
        assert!((group[0].velocity[0] + group[1].velocity[0]).abs() < 1e-4);
    }
}
