use swarm_core::{BoundaryMode, Bounds, Particle, SimulationConfig};

/// Rescale `velocity` so its length is at most `max_speed`, keeping direction
pub fn clamp_speed(velocity: &mut [f32; 2], max_speed: f32) {
    let speed = (velocity[0] * velocity[0] + velocity[1] * velocity[1]).sqrt();
    if speed > max_speed {
        let scale = max_speed / speed;
        velocity[0] *= scale;
        velocity[1] *= scale;
    }
}

/// Clamp to the edge and make the velocity component point back inside
pub fn bounce(p: &mut Particle, bounds: &Bounds) {
    let extent = [bounds.width, bounds.height];
    for axis in 0..2 {
        let low = p.radius;
        let high = extent[axis] - p.radius;
        if p.position[axis] <= low {
            p.position[axis] = low;
            p.velocity[axis] = p.velocity[axis].abs();
        } else if p.position[axis] >= high {
            p.position[axis] = high;
            p.velocity[axis] = -p.velocity[axis].abs();
        }
    }
}

/// Clamp into the screen without reflecting, then bleed off energy
pub fn clamp_and_damp(p: &mut Particle, bounds: &Bounds, damping: f32) {
    contain(p, bounds);
    p.velocity[0] *= damping;
    p.velocity[1] *= damping;
}

/// Clamp position into `[radius, extent - radius]`, velocity untouched
pub fn contain(p: &mut Particle, bounds: &Bounds) {
    p.position[0] = p.position[0].clamp(p.radius, bounds.width - p.radius);
    p.position[1] = p.position[1].clamp(p.radius, bounds.height - p.radius);
}

/// Advance one particle by one timestep under the configured boundary policy.
///
/// Callers must have checked `SimulationConfig::validate_bounds`, otherwise
/// the clamp range is empty.
pub fn advance(p: &mut Particle, bounds: &Bounds, config: &SimulationConfig) {
    let dt = config.dt;
    p.position[0] += p.velocity[0] * dt;
    p.position[1] += p.velocity[1] * dt;

    clamp_speed(&mut p.velocity, config.max_speed);

    match config.boundary_mode {
        BoundaryMode::Bounce => bounce(p, bounds),
        BoundaryMode::ClampAndDamp => clamp_and_damp(p, bounds, config.damping_factor),
    }
}

/// Restore the per-frame invariants after collision resolution has nudged
/// positions and added impulses: containment and the speed ceiling.
pub fn settle(p: &mut Particle, bounds: &Bounds, max_speed: f32) {
    contain(p, bounds);
    clamp_speed(&mut p.velocity, max_speed);
}
