use swarm_core::Particle;

/// Summary of the swarm's motion for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionStats {
    /// Sum of `0.5 * v^2` over all particles (unit mass)
    pub kinetic_energy: f64,
    pub mean_speed: f64,
    pub peak_speed: f64,
}

/// Total kinetic energy, every particle weighing one unit
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .map(|p| {
            let v2 = p.velocity[0] as f64 * p.velocity[0] as f64
                + p.velocity[1] as f64 * p.velocity[1] as f64;
            0.5 * v2
        })
        .sum()
}

pub fn motion_stats(particles: &[Particle]) -> MotionStats {
    if particles.is_empty() {
        return MotionStats::default();
    }

    let mut total = 0.0f64;
    let mut peak = 0.0f64;
    for p in particles {
        let s = p.speed() as f64;
        total += s;
        peak = peak.max(s);
    }

    MotionStats {
        kinetic_energy: kinetic_energy(particles),
        mean_speed: total / particles.len() as f64,
        peak_speed: peak,
    }
}

/// Number of overlapping unordered pairs. O(N^2), meant for diagnostics.
pub fn overlap_count(particles: &[Particle]) -> usize {
    let mut count = 0;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            if crate::collision::overlaps(a, b) {
                count += 1;
            }
        }
    }
    count
}
