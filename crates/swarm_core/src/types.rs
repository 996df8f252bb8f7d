use serde::{Deserialize, Serialize};

/// One simulated point, bound to an external addressable slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Slot index in the external container. Never reassigned.
    pub index: usize,
    /// Position (x, y) in screen pixels
    pub position: [f32; 2],
    /// Velocity (vx, vy) in pixels per second
    pub velocity: [f32; 2],
    /// Collision radius, constant for the particle's lifetime
    pub radius: f32,
}

impl Particle {
    pub fn new(index: usize, position: [f32; 2], radius: f32) -> Self {
        Self {
            index,
            position,
            velocity: [0.0, 0.0],
            radius,
        }
    }

    pub fn speed(&self) -> f32 {
        (self.velocity[0] * self.velocity[0] + self.velocity[1] * self.velocity[1]).sqrt()
    }

    /// Add a velocity change in place
    pub fn apply_force(&mut self, force: [f32; 2]) {
        self.velocity[0] += force[0];
        self.velocity[1] += force[1];
    }

    /// Euclidean distance between the two centers
    pub fn distance_to(&self, other: &Particle) -> f32 {
        let dx = other.position[0] - self.position[0];
        let dy = other.position[1] - self.position[1];
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rectangular screen extent; the origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    /// Whether a circle of `radius` at `position` lies fully inside
    pub fn contains(&self, position: [f32; 2], radius: f32) -> bool {
        position[0] >= radius
            && position[0] <= self.width - radius
            && position[1] >= radius
            && position[1] <= self.height - radius
    }

    /// Integer pixel coordinate clamped to `[0, extent - 1]`, as sinks expect
    pub fn pixel(&self, position: [f32; 2]) -> (i32, i32) {
        let max_x = (self.width as i32 - 1).max(0);
        let max_y = (self.height as i32 - 1).max(0);
        (
            (position[0] as i32).clamp(0, max_x),
            (position[1] as i32).clamp(0, max_y),
        )
    }
}

/// What the external container reports at start-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    /// Opaque platform handle of the slot owner
    pub handle: u64,
    /// Number of addressable slots (and therefore particles)
    pub slot_count: usize,
    /// Screen extent the slots live in
    pub bounds: Bounds,
}
