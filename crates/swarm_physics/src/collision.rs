use swarm_core::constants::MIN_COLLISION_DISTANCE;
use swarm_core::{Particle, SimulationConfig};

/// Circles overlap when their centers are closer than the sum of radii
pub fn overlaps(a: &Particle, b: &Particle) -> bool {
    a.distance_to(b) < a.radius + b.radius
}

/// Push an overlapping pair apart.
///
/// Both particles receive an equal and opposite velocity impulse of
/// `overlap * separation_strength` along the center line, and each is moved
/// `correction_factor * overlap` along that line straight away.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, config: &SimulationConfig) {
    let mut dx = b.position[0] - a.position[0];
    let mut dy = b.position[1] - a.position[1];
    let mut dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        // Coincident centers have no line between them; split along x.
        dist = MIN_COLLISION_DISTANCE;
        dx = MIN_COLLISION_DISTANCE;
        dy = 0.0;
    }
    let nx = dx / dist;
    let ny = dy / dist;
    let overlap = (a.radius + b.radius) - dist;

    let impulse = overlap * config.separation_strength;
    a.apply_force([-nx * impulse, -ny * impulse]);
    b.apply_force([nx * impulse, ny * impulse]);

    let shift = config.correction_factor * overlap;
    a.position[0] -= nx * shift;
    a.position[1] -= ny * shift;
    b.position[0] += nx * shift;
    b.position[1] += ny * shift;
}

/// Resolve every overlapping unordered pair `(i, j)`, `i < j`, in index order.
/// Returns the number of pairs that were overlapping.
pub fn resolve_all(particles: &mut [Particle], config: &SimulationConfig) -> usize {
    let mut resolved = 0;
    for i in 0..particles.len() {
        let (left, right) = particles.split_at_mut(i + 1);
        let a = &mut left[i];
        for b in right.iter_mut() {
            if overlaps(a, b) {
                resolve_pair(a, b, config);
                resolved += 1;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_detection() {
        let a = Particle::new(0, [0.0, 0.0], 25.0);
        assert!(overlaps(&a, &Particle::new(1, [49.9, 0.0], 25.0)));
        assert!(!overlaps(&a, &Particle::new(1, [50.0, 0.0], 25.0)));
    }

    #[test]
    fn test_overlap_thirty_apart() {
        let config = SimulationConfig::default();
        let mut a = Particle::new(0, [500.0, 400.0], 25.0);
        let mut b = Particle::new(1, [530.0, 400.0], 25.0);

        resolve_pair(&mut a, &mut b, &config);

        // overlap 20, half of it applied to each
        assert!((a.position[0] - 490.0).abs() < 1e-4);
        assert!((b.position[0] - 540.0).abs() < 1e-4);
        assert_eq!(a.position[1], 400.0);
        assert_eq!(b.position[1], 400.0);

        // 20 * 5.0 along the axis, pushing apart
        assert!((a.velocity[0] + 100.0).abs() < 1e-4);
        assert!((b.velocity[0] - 100.0).abs() < 1e-4);
        assert_eq!(a.velocity[1], 0.0);
    }

    #[test]
    fn test_coincident_centers_separate() {
        let config = SimulationConfig::default();
        let mut a = Particle::new(0, [300.0, 300.0], 25.0);
        let mut b = Particle::new(1, [300.0, 300.0], 25.0);

        resolve_pair(&mut a, &mut b, &config);

        assert!(a.position[0] < b.position[0]);
        assert!(a.velocity[0] < 0.0 && b.velocity[0] > 0.0);
        assert!(a.position.iter().chain(b.position.iter()).all(|v| v.is_finite()));
    }

    #[test]
    fn test_resolve_all_counts_pairs() {
        let config = SimulationConfig::default();
        let mut particles = vec![
            Particle::new(0, [100.0, 100.0], 25.0),
            Particle::new(1, [130.0, 100.0], 25.0),
            Particle::new(2, [800.0, 800.0], 25.0),
        ];

        assert_eq!(resolve_all(&mut particles, &config), 1);
        assert_eq!(particles[2].velocity, [0.0, 0.0]);
        assert!(particles[0].distance_to(&particles[1]) >= 50.0 - 1e-3);
    }
}
