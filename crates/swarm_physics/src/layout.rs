use std::f32::consts::TAU;

use swarm_core::{Bounds, Particle, Result, SwarmError};

/// Lay `n` particles out evenly on a circle around the screen center.
/// Particle `i` sits at angle `TAU * i / n` and gets slot index `i`.
pub fn circle_layout(
    n: usize,
    bounds: &Bounds,
    layout_radius: f32,
    particle_radius: f32,
) -> Result<Vec<Particle>> {
    if n == 0 {
        return Err(SwarmError::NoSlots);
    }

    let [cx, cy] = bounds.center();
    let particles = (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32;
            let pos = [
                cx + layout_radius * angle.cos(),
                cy + layout_radius * angle.sin(),
            ];
            Particle::new(i, pos, particle_radius)
        })
        .collect();

    Ok(particles)
}
